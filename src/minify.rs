/// Minify HTML.
///
/// Closing tags and the `html`/`head` opening tags are kept so that
/// fragments survive minification unchanged in structure. Comments are
/// removed, embedded CSS and JavaScript are minified.
///
/// # Examples
///
/// ```
/// let source = "<p>\n    hello\n</p>\n<!-- draft -->";
/// let html = mantle::minify(source);
///
/// assert!(html.len() < source.len());
/// assert!(!html.contains("draft"));
/// ```
pub fn minify(html: &str) -> String {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;

    let bytes = minify_html::minify(html.as_bytes(), &cfg);
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
