use super::{Pointer, RED, RESET};
use crate::{log::Visual, region::Region};
use std::fmt::{Debug, Display, Formatter, Result};

/// Describes which class of failure an [`Error`] represents.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// An `@use` or `@markdown` path did not resolve to a resource.
    ResourceNotFound,
    /// Inclusions were nested deeper than the configured limit.
    TooManyInclusions,
    /// A resource exists but could not be read.
    Io,
    /// A value could not be converted into template data.
    Serialize,
    /// Compiled output could not be written.
    Write,
    /// Any other failure, usually raised by a custom collaborator.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ErrorKind::ResourceNotFound => write!(f, "resource not found"),
            ErrorKind::TooManyInclusions => write!(f, "too many inclusions"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Serialize => write!(f, "serialize"),
            ErrorKind::Write => write!(f, "write"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Describes an error, and allows adding a contextual help text and visualization.
///
/// # Examples
///
/// Creating an [`Error`] that includes a [`Visual`] of type [`Pointer`]:
///
/// ```
/// use mantle::{Error, Region};
///
/// Error::build("resource not found")
///     .with_pointer("<main>@use:missing</main>", Region::new(6..18))
///     .with_name("index")
///     .with_help("no resource named `missing` could be loaded");
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: resource not found
///   --> index:1:7
///    |
///  1 | <main>@use:missing</main>
///    |       ^^^^^^^^^^^^
///    |
///   = help: no resource named `missing` could be loaded
/// ```
pub struct Error {
    /// Describes the cause of the [`Error`].
    reason: String,
    /// The class of failure.
    kind: ErrorKind,
    /// A visualization to help illustrate the [`Error`].
    visual: Option<Box<dyn Visual>>,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
    /// The name of the template that the [`Error`] comes from.
    name: Option<String>,
}

impl Error {
    /// Create a new [`Error`] with the given reason text.
    ///
    /// The [`ErrorKind`] starts as [`ErrorKind::Other`], the additional fields
    /// may be populated using the various methods defined on `Error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::Error;
    ///
    /// Error::build("profile template is unavailable")
    ///     .with_help("try again once the profile service is up");
    /// ```
    pub fn build<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            reason: reason.into(),
            kind: ErrorKind::Other,
            name: None,
            visual: None,
            help: None,
        }
    }

    /// Set the [`ErrorKind`].
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;

        self
    }

    /// Set the name text, which is the name of the template that the
    /// [`Error`] is related to.
    pub fn with_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.name = Some(text.into());

        self
    }

    /// Set the [`Visual`], which is a visualization that helps illustrate the
    /// cause of the error.
    pub fn with_visual(mut self, visual: impl Visual + 'static) -> Self {
        self.visual = Some(Box::new(visual));

        self
    }

    /// Set the visualization to a new [`Pointer`] with the given source text and
    /// [`Region`].
    pub fn with_pointer<T>(self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        self.with_visual(Pointer::new(source, region.into()))
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the reason text.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Return the name of the template that the error is related to.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return true if a [`Visual`] is attached.
    pub fn has_visual(&self) -> bool {
        self.visual.is_some()
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !f.alternate() {
            writeln!(f, "{self:#}")?;
        }
        f.debug_struct("Error")
            .field("reason", &self.reason)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("visual", &self.visual)
            .field("help", &self.help)
            .finish()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{RED}error{RESET}: {}", self.reason)?;

        if !f.alternate() {
            return Ok(());
        }
        match &self.visual {
            Some(visual) => visual.display(f, self.name.as_deref(), self.help.as_deref()),
            None => match &self.help {
                Some(help) => write!(f, "\n  = help: {help}"),
                None => Ok(()),
            },
        }
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason
            && self.kind == other.kind
            && self.help == other.help
            && self.name == other.name
    }
}
