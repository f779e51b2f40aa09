use pulldown_cmark::{html, Options, Parser};

/// Describes a type which converts lightweight markup into HTML.
///
/// Resources included with `@markdown:` are passed through the
/// [`Markdown`] of the [`Engine`][`crate::Engine`] before they are inserted.
pub trait Markdown: Send + Sync {
    /// Render the given markup as HTML.
    fn render(&self, markup: &str) -> String;
}

/// Allows any function matching the signature of `render` to be used as a
/// [`Markdown`] renderer.
impl<F> Markdown for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, markup: &str) -> String {
        self(markup)
    }
}

/// The default [`Markdown`] renderer, CommonMark with tables and
/// strikethrough.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMark;

impl Markdown for CommonMark {
    fn render(&self, markup: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markup, options);
        let mut buffer = String::with_capacity(markup.len() * 3 / 2);
        html::push_html(&mut buffer, parser);

        buffer
    }
}

/// Convert the given markup to HTML with [`CommonMark`].
///
/// # Examples
///
/// ```
/// assert_eq!(mantle::markdown("# Hello"), "<h1>Hello</h1>\n");
/// ```
pub fn markdown(markup: &str) -> String {
    CommonMark.render(markup)
}

#[cfg(test)]
mod tests {
    use super::markdown;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraph_and_emphasis() {
        assert_eq!(markdown("Some *emphasis*."), "<p>Some <em>emphasis</em>.</p>\n");
    }

    #[test]
    fn test_strikethrough_enabled() {
        assert_eq!(markdown("~~gone~~"), "<p><del>gone</del></p>\n");
    }

    #[test]
    fn test_table_enabled() {
        let output = markdown("| a |\n|---|\n| 1 |\n");

        assert!(output.starts_with("<table>"));
        assert!(output.contains("<td>1</td>"));
    }
}
