//! Mantle reads the location of template resources and the limits of the
//! compiler from a set of [`Options`]. This module defines `Options` and the
//! [`Builder`] type, which provides methods to easily generate them.
//!
//! `Options` also implement `Deserialize`, so a host may embed them in its
//! own configuration file. Missing fields take their default values.
mod builder;

pub use builder::Builder;

use serde::Deserialize;
use std::path::PathBuf;

/// Extension appended to every resource path by default.
pub const DEFAULT_EXTENSION: &str = ".tmpl";

/// Number of times the pipeline may restart after resolving an inclusion
/// before compilation is aborted.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for an [`Engine`][`crate::Engine`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory that resource paths are resolved against.
    pub base_path: PathBuf,
    /// Extension appended to resource paths, including the dot.
    pub extension: String,
    /// Maximum inclusion depth.
    pub max_depth: usize,
    /// Minify compiled output.
    pub minify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_path: PathBuf::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            minify: false,
        }
    }
}

/// Remove trailing separators from a base path, keeping a lone root intact.
pub(crate) fn normalize_base_path(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let text = path.to_string_lossy();
    let trimmed = text.trim_end_matches('/');

    if trimmed.is_empty() && text.starts_with('/') {
        PathBuf::from("/")
    } else if trimmed.len() == text.len() {
        path
    } else {
        PathBuf::from(trimmed)
    }
}
