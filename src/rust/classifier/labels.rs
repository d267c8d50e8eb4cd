use serde::{Deserialize, Serialize};
use std::fmt;

/// The two classes the disaster model distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisasterLabel {
    #[serde(rename = "Not Disaster")]
    NotDisaster,
    #[serde(rename = "Disaster")]
    Disaster,
}

/// Class index → label, in the order of the model's logits row.
///
/// Source of truth is the training data of
/// `BilallaliB/distilbert-disaster-tweet-classification`: the Kaggle disaster
/// tweets `target` column, where 1 marks a real disaster. The exported model
/// config only carries generic `LABEL_0`/`LABEL_1` names, so this cannot be
/// read back from the artifacts.
pub const LABEL_BY_INDEX: [DisasterLabel; 2] = [DisasterLabel::NotDisaster, DisasterLabel::Disaster];

impl DisasterLabel {
    pub fn from_index(index: usize) -> Option<Self> {
        LABEL_BY_INDEX.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Self::NotDisaster => 0,
            Self::Disaster => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotDisaster => "Not Disaster",
            Self::Disaster => "Disaster",
        }
    }
}

impl fmt::Display for DisasterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
