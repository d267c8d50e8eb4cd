use std::path::{Component, Path, PathBuf};

use actix_files::NamedFile;
use actix_web::{web, HttpRequest};

/// Name of the document served for every path that is not a file.
pub const ENTRY_DOCUMENT: &str = "index.html";

/// Directory of front-end assets with single-page-application fallback.
#[derive(Debug, Clone)]
pub struct StaticRoot {
    root: PathBuf,
}

impl StaticRoot {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_document(&self) -> PathBuf {
        self.root.join(ENTRY_DOCUMENT)
    }

    /// Maps a request path (without its leading `/`) to the file to serve.
    ///
    /// Returns the named file when it exists as a regular file under the root,
    /// otherwise the entry document. Paths with `..`, root or prefix
    /// components never leave the root; they get the entry document too.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let relative = Path::new(path);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        if !path.is_empty() && contained {
            let candidate = self.root.join(relative);
            if candidate.is_file() {
                return candidate;
            }
        }
        self.entry_document()
    }
}

/// `GET /` and `GET /{path}`
///
/// Content type is derived from the file extension. A missing entry document
/// surfaces as 404 through actix's `io::Error` mapping.
pub async fn serve(req: HttpRequest, root: web::Data<StaticRoot>) -> actix_web::Result<NamedFile> {
    // Routes without a `{path}` segment fall back to the request path
    let path = req
        .match_info()
        .get("path")
        .unwrap_or_else(|| req.path().trim_start_matches('/'));
    let file = root.resolve(path);
    log::debug!("Resolved '{}' to {:?}", path, file);
    Ok(NamedFile::open_async(file).await?)
}
