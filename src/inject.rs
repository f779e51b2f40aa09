//! Registry of assets that templates place with `@inject:<type>`.
//!
//! Entries accumulate per type and are rendered in descending order of
//! priority. Entries that share a priority keep the order they were
//! registered in.
use crate::compile::is_argument;
use std::{collections::HashMap, fmt::Write};

/// Priority used when none is given.
pub const DEFAULT_PRIORITY: i32 = 5;

/// Types that every [`Injectables`] registry knows about from the start.
pub const DEFAULT_TYPES: [&str; 4] = ["css", "js", "head", "end_body"];

/// A single registered asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injectable {
    /// The asset. A URL for `css` and `js`, raw markup for anything else.
    pub content: String,
    /// Higher priorities are rendered first.
    pub priority: i32,
}

/// Describes content that can be registered as one or more injectables.
///
/// Implemented for single strings and for collections of strings, in which
/// case every item becomes its own entry sharing the same priority.
pub trait Content {
    /// Convert into the individual entries.
    fn into_items(self) -> Vec<String>;
}

impl Content for &str {
    fn into_items(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl Content for String {
    fn into_items(self) -> Vec<String> {
        vec![self]
    }
}

impl<S> Content for Vec<S>
where
    S: Into<String>,
{
    fn into_items(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S, const N: usize> Content for [S; N]
where
    S: Into<String>,
{
    fn into_items(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S> Content for &[S]
where
    S: AsRef<str>,
{
    fn into_items(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

/// Storage for [`Injectable`] entries, keyed by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injectables {
    types: HashMap<String, Vec<Injectable>>,
}

impl Default for Injectables {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES
                .iter()
                .map(|kind| (kind.to_string(), Vec::new()))
                .collect(),
        }
    }
}

impl Injectables {
    /// Create a new registry that knows the [`DEFAULT_TYPES`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register content under the given type.
    ///
    /// Custom types become known the first time they are registered. A type
    /// that cannot be written as the argument of `@inject:`, such as
    /// `hero:top`, is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::Injectables;
    ///
    /// let mut injectables = Injectables::new();
    /// injectables.register("js", ["vendor.js", "app.js"], 10);
    /// injectables.register("footer", "<p>fin</p>", 5);
    ///
    /// assert_eq!(injectables.entries("js").len(), 2);
    /// assert!(injectables.contains("footer"));
    /// ```
    pub fn register<C>(&mut self, kind: impl Into<String>, content: C, priority: i32)
    where
        C: Content,
    {
        let kind = kind.into();
        if !is_argument(&kind) {
            tracing::warn!(kind, "ignoring injectable with unreachable type");
            return;
        }

        let entries = self.types.entry(kind).or_default();
        for content in content.into_items() {
            entries.push(Injectable { content, priority });
        }
    }

    /// Register content under the given type.
    ///
    /// Returns the [`Injectables`], so additional methods may be chained.
    #[inline]
    pub fn with<C>(mut self, kind: impl Into<String>, content: C, priority: i32) -> Self
    where
        C: Content,
    {
        self.register(kind, content, priority);

        self
    }

    /// Return true if the type is known, even if it holds no entries.
    #[inline]
    pub fn contains(&self, kind: &str) -> bool {
        self.types.contains_key(kind)
    }

    /// Return the entries of a type in registration order.
    pub fn entries(&self, kind: &str) -> &[Injectable] {
        self.types.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Render the entries of a type, highest priority first.
    ///
    /// `css` entries become stylesheet links, `js` entries become script
    /// references, and entries of every other type are written as-is. Each
    /// entry is followed by a line break. Unknown and empty types render to
    /// an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::Injectables;
    ///
    /// let injectables = Injectables::new()
    ///     .with("js", "late.js", 1)
    ///     .with("js", "early.js", 10);
    ///
    /// assert_eq!(
    ///     injectables.render("js"),
    ///     "<script src=\"early.js\"></script>\n<script src=\"late.js\"></script>\n"
    /// );
    /// ```
    pub fn render(&self, kind: &str) -> String {
        let mut sorted: Vec<&Injectable> = self.entries(kind).iter().collect();
        sorted.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut buffer = String::new();
        for injectable in sorted {
            let content = &injectable.content;
            // Writing into a String cannot fail.
            let _ = match kind {
                "css" => writeln!(
                    buffer,
                    r#"<link rel="stylesheet" href="{content}" type="text/css" media="all" />"#
                ),
                "js" => writeln!(buffer, r#"<script src="{content}"></script>"#),
                _ => writeln!(buffer, "{content}"),
            };
        }

        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::{Injectable, Injectables, DEFAULT_PRIORITY, DEFAULT_TYPES};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_types_known_and_empty() {
        let injectables = Injectables::new();

        for kind in DEFAULT_TYPES {
            assert!(injectables.contains(kind));
            assert_eq!(injectables.render(kind), "");
        }
        assert!(!injectables.contains("footer"));
        assert_eq!(injectables.render("footer"), "");
    }

    #[test]
    fn test_css_descending_priority() {
        let injectables = Injectables::new()
            .with("css", "a.css", 10)
            .with("css", "b.css", 1);

        assert_eq!(
            injectables.render("css"),
            "<link rel=\"stylesheet\" href=\"a.css\" type=\"text/css\" media=\"all\" />\n\
             <link rel=\"stylesheet\" href=\"b.css\" type=\"text/css\" media=\"all\" />\n"
        );
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let injectables = Injectables::new()
            .with("head", "<meta a>", DEFAULT_PRIORITY)
            .with("head", "<meta top>", 9)
            .with("head", "<meta b>", DEFAULT_PRIORITY);

        assert_eq!(injectables.render("head"), "<meta top>\n<meta a>\n<meta b>\n");
    }

    #[test]
    fn test_sequence_shares_priority() {
        let mut injectables = Injectables::new();
        injectables.register("end_body", vec!["<x>", "<y>"], 3);
        injectables.register("end_body", &["<z>"][..], 3);

        assert_eq!(
            injectables.entries("end_body"),
            &[
                Injectable {
                    content: "<x>".to_string(),
                    priority: 3
                },
                Injectable {
                    content: "<y>".to_string(),
                    priority: 3
                },
                Injectable {
                    content: "<z>".to_string(),
                    priority: 3
                },
            ]
        );
    }

    #[test]
    fn test_unreachable_type_ignored() {
        let mut injectables = Injectables::new();
        injectables.register("hero:top", "<b>", 1);
        injectables.register("main content", "<b>", 1);

        assert!(!injectables.contains("hero:top"));
        assert!(!injectables.contains("main content"));
        assert_eq!(injectables, Injectables::new());
    }

    #[test]
    fn test_custom_type_raw() {
        let injectables = Injectables::new().with("footer", String::from("<p>fin</p>"), 1);

        assert!(injectables.contains("footer"));
        assert_eq!(injectables.render("footer"), "<p>fin</p>\n");
    }
}
