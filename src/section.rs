use std::collections::HashMap;

/// Storage for the named blocks captured from `@section:` tags.
///
/// A fresh [`Sections`] is created for every call to
/// [`Engine::compile`][`crate::Engine::compile`], so templates compiled
/// separately never see each other's sections. Hosts that want sections to
/// outlive a single call may keep their own `Sections` and pass it to
/// [`Engine::compile_with`][`crate::Engine::compile_with`].
///
/// # Examples
///
/// ```
/// use mantle::{Engine, Sections, Store};
///
/// let engine = Engine::default();
/// let mut sections = Sections::new();
///
/// engine
///     .compile_with("@section:title\nHome\n@endsection", &Store::new(), &mut sections)
///     .unwrap();
/// let output = engine.compile_with("<h1>@place:title</h1>", &Store::new(), &mut sections);
///
/// assert_eq!(output.unwrap(), "<h1>Home</h1>");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sections {
    sections: HashMap<String, String>,
}

impl Sections {
    /// Create a new, empty [`Sections`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a section, replacing the content of any section with the same name.
    pub fn define(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.sections.insert(name.into(), content.into());
    }

    /// Define a section.
    ///
    /// Returns the [`Sections`], so additional methods may be chained.
    #[inline]
    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.define(name, content);

        self
    }

    /// Return the content of the named section.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sections.get(name).map(String::as_str)
    }

    /// Return true if a section with the given name is defined.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Returns the number of defined sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if no sections are defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Sections;

    #[test]
    fn test_define_overwrites() {
        let mut sections = Sections::new().with("title", "Home");
        sections.define("title", "About");

        assert_eq!(sections.get("title"), Some("About"));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_unknown() {
        let sections = Sections::new();

        assert!(sections.is_empty());
        assert!(!sections.contains("sidebar"));
        assert_eq!(sections.get("sidebar"), None);
    }
}
