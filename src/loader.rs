//! Resolution of `@use:` and `@markdown:` paths to template text.
//!
//! A [`Loader`] turns a path into a [`Resource`]. A resource is either plain
//! text, or something [`Renderable`] that produces text once it is given the
//! flattened [`Data`] of the current compile call. Which of the two a loader
//! returns is entirely up to the loader.
use crate::{
    data::Data,
    log::{error_io, error_not_found, Error},
};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Describes a resource that must be evaluated with data to yield text.
pub trait Renderable: Send + Sync {
    /// Produce the text of the resource.
    fn render(&self, data: &Data) -> Result<String, Error>;
}

/// Allows any function matching the signature of `render` to be used as a
/// [`Renderable`].
impl<F> Renderable for F
where
    F: Fn(&Data) -> Result<String, Error> + Send + Sync,
{
    fn render(&self, data: &Data) -> Result<String, Error> {
        self(data)
    }
}

/// A loaded resource.
#[derive(Clone)]
pub enum Resource {
    /// Text that is included as-is.
    Text(String),
    /// A resource evaluated with the data of the compile call.
    Renderable(Arc<dyn Renderable>),
}

impl Resource {
    /// Create a [`Resource::Renderable`] from the given function or type.
    pub fn renderable(renderable: impl Renderable + 'static) -> Self {
        Self::Renderable(Arc::new(renderable))
    }

    /// Return the text of the resource.
    ///
    /// # Errors
    ///
    /// Propagates any [`Error`] returned by a [`Renderable`].
    pub fn evaluate(&self, data: &Data) -> Result<String, Error> {
        match self {
            Resource::Text(text) => Ok(text.clone()),
            Resource::Renderable(renderable) => renderable.render(data),
        }
    }
}

impl Debug for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Resource::Renderable(_) => f.write_str("Renderable(..)"),
        }
    }
}

impl From<String> for Resource {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Resource {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Describes a type that resolves paths to resources.
pub trait Loader: Send + Sync {
    /// Load the resource at the given path.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind
    /// [`ResourceNotFound`][`crate::ErrorKind::ResourceNotFound`] when nothing
    /// exists at the path.
    fn load(&self, path: &str) -> Result<Resource, Error>;
}

/// Loads resources from the file system.
///
/// A path is resolved as the base path, a separator, the path with any
/// leading separators removed, and finally the extension.
///
/// # Examples
///
/// ```
/// use mantle::FileLoader;
/// use std::path::PathBuf;
///
/// let loader = FileLoader::new("views", ".tmpl");
/// assert_eq!(loader.resolve("/partials/nav"), PathBuf::from("views/partials/nav.tmpl"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    base_path: PathBuf,
    extension: String,
}

impl FileLoader {
    /// Create a new [`FileLoader`].
    pub fn new(base_path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            base_path: crate::config::normalize_base_path(base_path),
            extension: extension.into(),
        }
    }

    /// Return the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Set the base path, trailing separators are removed.
    pub fn set_base_path(&mut self, base_path: impl Into<PathBuf>) {
        self.base_path = crate::config::normalize_base_path(base_path);
    }

    /// Return the extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Set the extension, including the dot.
    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.extension = extension.into();
    }

    /// Return the file system path that the given resource path resolves to.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let relative = format!("{}{}", path.trim_start_matches('/'), self.extension);

        self.base_path.join(relative)
    }
}

impl Loader for FileLoader {
    fn load(&self, path: &str) -> Result<Resource, Error> {
        let resolved = self.resolve(path);
        tracing::trace!(path, file = %resolved.display(), "loading resource");

        match std::fs::read_to_string(&resolved) {
            Ok(text) => Ok(Resource::Text(text)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Err(error_not_found(path)),
            Err(e) if resolved.is_dir() => Err(error_not_found(path)
                .with_help(format!("`{}` is a directory: {e}", resolved.display()))),
            Err(e) => Err(error_io(&resolved, e)),
        }
    }
}

/// Loads resources from memory.
///
/// Useful to hosts that keep their templates somewhere other than the file
/// system, and to tests.
///
/// # Examples
///
/// ```
/// use mantle::{Engine, MemoryLoader, Store};
///
/// let loader = MemoryLoader::new()
///     .with("greeting", "Hello, {{name}}!");
/// let engine = Engine::default().with_loader(loader);
///
/// let output = engine.compile("@use:greeting", &Store::new().with_must("name", "Ada"));
/// assert_eq!(output.unwrap(), "Hello, Ada!");
/// ```
#[derive(Clone, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, Resource>,
}

impl MemoryLoader {
    /// Create a new, empty [`MemoryLoader`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource under the given name, replacing any resource that
    /// already has that name.
    pub fn add(&mut self, name: impl AsRef<str>, resource: impl Into<Resource>) {
        let name = name.as_ref().trim_start_matches('/').to_string();
        self.resources.insert(name, resource.into());
    }

    /// Add a resource under the given name.
    ///
    /// Returns the [`MemoryLoader`], so additional methods may be chained.
    pub fn with(mut self, name: impl AsRef<str>, resource: impl Into<Resource>) -> Self {
        self.add(name, resource);

        self
    }

    /// Return true if a resource with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name.trim_start_matches('/'))
    }
}

impl Debug for MemoryLoader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.resources.keys().collect();
        names.sort();
        f.debug_struct("MemoryLoader")
            .field("resources", &names)
            .finish()
    }
}

impl Loader for MemoryLoader {
    fn load(&self, path: &str) -> Result<Resource, Error> {
        self.resources
            .get(path.trim_start_matches('/'))
            .cloned()
            .ok_or_else(|| error_not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::{FileLoader, Loader, MemoryLoader, Resource};
    use crate::{
        data::Data,
        log::{Error, ErrorKind},
        Store,
    };
    use pretty_assertions::assert_eq;
    use std::{fs, path::PathBuf};

    #[test]
    fn test_resolve() {
        let loader = FileLoader::new("views/", ".tmpl");

        assert_eq!(loader.resolve("home"), PathBuf::from("views/home.tmpl"));
        assert_eq!(loader.resolve("//a/b"), PathBuf::from("views/a/b.tmpl"));
    }

    #[test]
    fn test_file_loader_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("partials/nav.tmpl"), "<nav></nav>").unwrap();
        let loader = FileLoader::new(dir.path(), ".tmpl");

        let text = loader
            .load("partials/nav")
            .unwrap()
            .evaluate(&Data::default())
            .unwrap();
        assert_eq!(text, "<nav></nav>");
    }

    #[test]
    fn test_file_loader_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileLoader::new(dir.path(), ".tmpl");
        let error = loader.load("missing").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with("/a", "alpha");

        assert!(loader.contains("a"));
        assert!(matches!(loader.load("a"), Ok(Resource::Text(t)) if t == "alpha"));
        assert_eq!(
            loader.load("b").unwrap_err().kind(),
            ErrorKind::ResourceNotFound
        );
    }

    #[test]
    fn test_renderable_sees_data() {
        let resource = Resource::renderable(|data: &Data| -> Result<String, Error> {
            Ok(format!("{} items", data.text("cart.count").unwrap_or_default()))
        });
        let store = Store::new().with_must("cart", serde_json::json!({ "count": 3 }));
        let data = Data::flatten(&store);

        assert_eq!(resource.evaluate(&data).unwrap(), "3 items");
    }
}
