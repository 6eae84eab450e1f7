use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Static files from `dir`; unknown paths get `index.html` so the client
/// router can resolve them.
pub fn serve_client(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
