use criterion::{black_box, criterion_group, criterion_main, Criterion};
use disaster_api::{BuiltinModel, Classifier, ModelManager, OnnxScorer, Prediction, RuntimeConfig};
use std::sync::Arc;

const SHORT_TWEET: &str = "Forest fire spreading rapidly near town";
const LONG_TWEET: &str = "Residents of the valley were told to evacuate tonight as the river \
     keeps rising after three days of rain. Emergency shelters are open at the high school \
     and the community center; officials expect the bridge on Route 9 to close by morning.";

fn bench_postprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Postprocessing");
    group.sample_size(100);

    group.bench_function("from_logits", |b| b.iter(|| {
        Prediction::from_logits(black_box([-1.25f32, 2.5].as_slice())).unwrap()
    }));

    group.finish();
}

fn load_scorer(config: RuntimeConfig) -> Option<OnnxScorer> {
    let manager = ModelManager::new_default().ok()?;
    let model = BuiltinModel::DistilBertDisasterTweets;
    let name = model.name();
    if !manager.is_model_downloaded(name) {
        eprintln!("Model not downloaded to {:?}; skipping model benchmarks", manager.models_dir());
        return None;
    }
    OnnxScorer::load(
        &manager.get_model_path(name),
        &manager.get_tokenizer_path(name),
        model.characteristics().max_sequence_length,
        &config,
    )
    .ok()
}

fn bench_tokenization(c: &mut Criterion) {
    let Some(scorer) = load_scorer(RuntimeConfig::default()) else { return };
    let mut group = c.benchmark_group("Tokenization");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("short_tweet", |b| b.iter(|| {
        scorer.count_tokens(black_box(SHORT_TWEET)).unwrap()
    }));
    group.bench_function("long_tweet", |b| b.iter(|| {
        scorer.count_tokens(black_box(LONG_TWEET)).unwrap()
    }));

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Classification");
    group.sample_size(30);
    group.warm_up_time(std::time::Duration::from_secs(2));

    for threads in [1usize, 4] {
        let Some(scorer) = load_scorer(RuntimeConfig::default().with_intra_threads(threads)) else { return };
        let classifier = Classifier::builder()
            .with_scorer(Arc::new(scorer))
            .build()
            .unwrap();

        group.bench_function(format!("short_tweet_{}_threads", threads), |b| b.iter(|| {
            classifier.classify(black_box(SHORT_TWEET)).unwrap()
        }));
        group.bench_function(format!("long_tweet_{}_threads", threads), |b| b.iter(|| {
            classifier.classify(black_box(LONG_TWEET)).unwrap()
        }));
    }

    group.finish();
}

criterion_group!(benches, bench_postprocessing, bench_tokenization, bench_classification);
criterion_main!(benches);
