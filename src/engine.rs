use crate::{
    compile::Pipeline,
    config::{normalize_base_path, Options},
    data::Data,
    escape::{Escape, HtmlEscape},
    inject::{Content, Injectables, DEFAULT_PRIORITY},
    loader::{FileLoader, Loader},
    log::{error_write, Error},
    markdown::{CommonMark, Markdown},
    minify::minify,
    section::Sections,
    Store,
};
use std::{
    fmt::{Debug, Formatter},
    io::Write,
    path::{Path, PathBuf},
};

/// Facilitates compiling templates, and provides storage for injectables
/// and the collaborators used while compiling.
///
/// # Examples
///
/// ```
/// use mantle::{Engine, MemoryLoader, Store};
///
/// let engine = Engine::default()
///     .with_loader(MemoryLoader::new().with("layout", "<head>@inject:css</head>@place:body"))
///     .with_injectable("css", "site.css", 5);
///
/// let template = "@use:layout\n@section:body\n<p>{{text}}</p>\n@endsection";
/// let output = engine.compile(template, &Store::new().with_must("text", "hi"));
///
/// assert_eq!(
///     output.unwrap(),
///     "<head><link rel=\"stylesheet\" href=\"site.css\" type=\"text/css\" media=\"all\" />\n</head><p>hi</p>"
/// );
/// ```
pub struct Engine {
    /// Settings that this Engine was created with.
    options: Options,
    /// Loader used when no other loader is set.
    files: FileLoader,
    /// Loader set by the host, replacing the file loader.
    loader: Option<Box<dyn Loader>>,
    /// Assets placed by `@inject:` tags.
    injectables: Injectables,
    /// Escaper applied to variables.
    escaper: Box<dyn Escape>,
    /// Renderer applied to `@markdown:` resources.
    markdown: Box<dyn Markdown>,
}

impl Engine {
    /// Create a new [`Engine`] with the given [`Options`].
    pub fn new(options: Options) -> Self {
        let files = FileLoader::new(&options.base_path, options.extension.as_str());
        let options = Options {
            base_path: files.base_path().to_path_buf(),
            ..options
        };

        Self {
            options,
            files,
            loader: None,
            injectables: Injectables::default(),
            escaper: Box::new(HtmlEscape),
            markdown: Box::new(CommonMark),
        }
    }

    /// Return the [`Options`] of this [`Engine`].
    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Return the directory that resource paths are resolved against.
    #[inline]
    pub fn base_path(&self) -> &Path {
        &self.options.base_path
    }

    /// Set the directory that resource paths are resolved against.
    ///
    /// Trailing separators are removed.
    pub fn set_base_path(&mut self, path: impl Into<PathBuf>) {
        self.options.base_path = normalize_base_path(path);
        self.files.set_base_path(&self.options.base_path);
    }

    /// Return the extension appended to resource paths.
    #[inline]
    pub fn extension(&self) -> &str {
        &self.options.extension
    }

    /// Set the extension appended to resource paths, including the dot.
    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.options.extension = extension.into();
        self.files.set_extension(self.options.extension.as_str());
    }

    /// Set the [`Loader`] that resolves `@use:` and `@markdown:` paths,
    /// replacing the [`FileLoader`] built from the [`Options`].
    pub fn set_loader(&mut self, loader: impl Loader + 'static) {
        self.loader = Some(Box::new(loader));
    }

    /// Set the [`Loader`].
    ///
    /// Returns the [`Engine`], so additional methods may be chained.
    #[inline]
    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.set_loader(loader);

        self
    }

    /// Set the [`Escape`] applied to variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::{Engine, Store};
    ///
    /// let engine = Engine::default().with_escaper(|value: &str| value.to_uppercase());
    /// let output = engine.compile("{{name}}", &Store::new().with_must("name", "ada"));
    ///
    /// assert_eq!(output.unwrap(), "ADA");
    /// ```
    pub fn with_escaper(mut self, escaper: impl Escape + 'static) -> Self {
        self.escaper = Box::new(escaper);

        self
    }

    /// Set the [`Markdown`] renderer applied to `@markdown:` resources.
    pub fn with_markdown(mut self, markdown: impl Markdown + 'static) -> Self {
        self.markdown = Box::new(markdown);

        self
    }

    /// Register content under the given injectable type.
    ///
    /// Entries accumulate across calls and are never cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::{Engine, Store};
    ///
    /// let mut engine = Engine::default();
    /// engine.register("js", ["vendor.js", "app.js"], 10);
    /// engine.register("js", "analytics.js", 1);
    ///
    /// let output = engine.compile("@inject:js", &Store::new()).unwrap();
    /// assert_eq!(
    ///     output,
    ///     "<script src=\"vendor.js\"></script>\n\
    ///      <script src=\"app.js\"></script>\n\
    ///      <script src=\"analytics.js\"></script>"
    /// );
    /// ```
    pub fn register<C>(&mut self, kind: impl Into<String>, content: C, priority: i32)
    where
        C: Content,
    {
        self.injectables.register(kind, content, priority);
    }

    /// Register content under the given injectable type with the default
    /// priority.
    #[inline]
    pub fn register_default<C>(&mut self, kind: impl Into<String>, content: C)
    where
        C: Content,
    {
        self.register(kind, content, DEFAULT_PRIORITY);
    }

    /// Register content under the given injectable type.
    ///
    /// Returns the [`Engine`], so additional methods may be chained.
    #[inline]
    pub fn with_injectable<C>(mut self, kind: impl Into<String>, content: C, priority: i32) -> Self
    where
        C: Content,
    {
        self.register(kind, content, priority);

        self
    }

    /// Return the registered [`Injectables`].
    #[inline]
    pub fn injectables(&self) -> &Injectables {
        &self.injectables
    }

    /// Compile a template with the given [`Store`].
    ///
    /// Sections captured while compiling are discarded once the call returns.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if an included resource cannot be loaded, or if
    /// inclusions are nested deeper than [`Options::max_depth`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::{Engine, Store};
    /// use serde_json::json;
    ///
    /// let store = Store::new().with_must("user", json!({ "name": "<Ada>" }));
    /// let output = Engine::default().compile("{{user.name}} {{!user.name}} {{user.age||18}}", &store);
    ///
    /// assert_eq!(output.unwrap(), "&lt;Ada&gt; <Ada> 18");
    /// ```
    #[inline]
    pub fn compile(&self, text: &str, store: &Store) -> Result<String, Error> {
        self.compile_with(text, store, &mut Sections::new())
    }

    /// Compile a template with the given [`Store`], capturing and placing
    /// sections in the given [`Sections`].
    ///
    /// Sections defined by earlier calls with the same `Sections` may be
    /// placed, and sections defined by this call remain available afterwards.
    ///
    /// # Errors
    ///
    /// See [`Engine::compile`].
    pub fn compile_with(
        &self,
        text: &str,
        store: &Store,
        sections: &mut Sections,
    ) -> Result<String, Error> {
        let data = Data::flatten(store);
        self.compile_data(text, &data, sections, None)
    }

    /// Load the resource at the given path and compile it with the given
    /// [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resource, or any resource that it
    /// includes, cannot be loaded.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::{Engine, MemoryLoader, Store};
    ///
    /// let engine = Engine::default()
    ///     .with_loader(MemoryLoader::new().with("home", "  <h1>{{title}}</h1>\n"));
    /// let output = engine.compile_file("home", &Store::new().with_must("title", "Home"));
    ///
    /// assert_eq!(output.unwrap(), "<h1>Home</h1>");
    /// ```
    pub fn compile_file(&self, path: &str, store: &Store) -> Result<String, Error> {
        let data = Data::flatten(store);
        let text = self
            .loader()
            .load(path)?
            .evaluate(&data)
            .map_err(|e| e.with_name(path))?;

        self.compile_data(&text, &data, &mut Sections::new(), Some(path))
    }

    /// Compile a template and write the output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if compiling fails, or if the output cannot be
    /// written.
    pub fn compile_to<W>(&self, text: &str, store: &Store, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        let output = self.compile(text, store)?;
        writer.write_all(output.as_bytes()).map_err(error_write)
    }

    /// Load and compile the resource at the given path, and write the output
    /// to the given writer.
    ///
    /// # Errors
    ///
    /// See [`Engine::compile_file`] and [`Engine::compile_to`].
    pub fn compile_file_to<W>(&self, path: &str, store: &Store, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        let output = self.compile_file(path, store)?;
        writer.write_all(output.as_bytes()).map_err(error_write)
    }

    fn compile_data(
        &self,
        text: &str,
        data: &Data,
        sections: &mut Sections,
        name: Option<&str>,
    ) -> Result<String, Error> {
        tracing::debug!(name, keys = data.len(), "compiling template");
        let output = Pipeline::new(self, data, sections)
            .with_name(name)
            .run(text)?;

        if self.options.minify {
            return Ok(minify(&output));
        }

        Ok(output)
    }

    /// Return the [`Loader`] in use.
    pub(crate) fn loader(&self) -> &dyn Loader {
        match &self.loader {
            Some(loader) => loader.as_ref(),
            None => &self.files,
        }
    }

    pub(crate) fn escaper(&self) -> &dyn Escape {
        self.escaper.as_ref()
    }

    pub(crate) fn markdown(&self) -> &dyn Markdown {
        self.markdown.as_ref()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("custom_loader", &self.loader.is_some())
            .field("injectables", &self.injectables)
            .finish_non_exhaustive()
    }
}
