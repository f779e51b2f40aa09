//! Escaping of values before they are written into compiled output.
//!
//! Every value reached through `{{key}}` or `{{key||default}}` passes through
//! an [`Escape`] implementation. The bang forms `{{!key}}` and
//! `{{!key||default}}` bypass it.

/// Describes a type which renders text safe for output.
pub trait Escape: Send + Sync {
    /// Return the escaped form of the given text.
    fn escape(&self, value: &str) -> String;
}

/// Allows any function matching the signature of `escape` to be used as an
/// [`Escape`], instead of requiring a struct be created.
impl<F> Escape for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn escape(&self, value: &str) -> String {
        self(value)
    }
}

/// The default [`Escape`], which neutralizes the HTML reserved characters
/// `&`, `<`, `>`, `"` and `'`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlEscape;

impl Escape for HtmlEscape {
    fn escape(&self, value: &str) -> String {
        html_escape::encode_quoted_attribute(value).into_owned()
    }
}

/// Escape the given text with [`HtmlEscape`].
///
/// # Examples
///
/// ```
/// assert_eq!(mantle::escape("<a href='x'>"), "&lt;a href=&#x27;x&#x27;&gt;");
/// ```
pub fn escape(value: &str) -> String {
    HtmlEscape.escape(value)
}
