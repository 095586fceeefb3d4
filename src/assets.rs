//! Asset path resolution for a library root directory.
//!
//! A library root contains two fixed namespaces: `data/` for the index and
//! content documents, and `images/` for figures. Upstream content data is
//! inconsistent about whether image references carry the `images/` prefix
//! (or a leading slash), so image resolution normalizes both forms.

use std::path::{Path, PathBuf};

/// Resolves resource and image references against a library root.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    base: PathBuf,
}

impl AssetPaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The library root directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve a content resource path under `data/`.
    pub fn data(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base.join("data").join(relative)
    }

    /// Path of the library index document.
    pub fn library_index(&self) -> PathBuf {
        self.data("library.json")
    }

    /// Resolve an image reference under `images/`.
    ///
    /// Strips one leading path separator or one literal `images/` prefix if
    /// present, then resolves under the canonical images directory, so
    /// `foo.png`, `images/foo.png`, and `/images/foo.png` all map to the
    /// same final path.
    pub fn image(&self, raw: &str) -> PathBuf {
        let src = raw.strip_prefix('/').unwrap_or(raw);
        let src = src.strip_prefix("images/").unwrap_or(src);
        self.base.join("images").join(src)
    }
}
