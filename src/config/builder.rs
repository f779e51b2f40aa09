use super::{normalize_base_path, Options};
use std::path::PathBuf;

/// Provides methods to build [`Options`].
///
/// # Example
///
/// ```
/// use mantle::Builder;
///
/// let options = Builder::new()
///     .with_base_path("views/")
///     .with_extension(".html")
///     .to_options();
///
/// assert_eq!(options.base_path.to_str(), Some("views"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    options: Options,
}

impl Builder {
    /// Create a new [`Builder`].
    ///
    /// The `Builder` starts with the default [`Options`]:
    ///
    /// ```text
    /// Base path: (none, relative to the working directory)
    /// Extension: .tmpl
    /// Maximum depth: 64
    /// Minify: false
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path, trailing separators are removed.
    #[inline]
    pub fn set_base_path(&mut self, path: impl Into<PathBuf>) {
        self.options.base_path = normalize_base_path(path);
    }

    /// Set the base path.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.set_base_path(path);

        self
    }

    /// Set the extension appended to resource paths, including the dot.
    #[inline]
    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.options.extension = extension.into();
    }

    /// Set the extension.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.set_extension(extension);

        self
    }

    /// Set the maximum inclusion depth.
    #[inline]
    pub fn set_max_depth(&mut self, depth: usize) {
        self.options.max_depth = depth;
    }

    /// Set the maximum inclusion depth.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.set_max_depth(depth);

        self
    }

    /// Enable or disable minification of compiled output.
    #[inline]
    pub fn set_minify(&mut self, minify: bool) {
        self.options.minify = minify;
    }

    /// Enable or disable minification.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.set_minify(minify);

        self
    }

    /// Return the [`Options`] built so far.
    #[inline]
    pub fn to_options(&self) -> Options {
        self.options.clone()
    }
}
