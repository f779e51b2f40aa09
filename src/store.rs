use crate::log::{error_serialize, Error, ErrorKind};
use serde::Serialize;
use serde_json::{to_value, Map, Value};

/// Provides storage for the nested data that a template is compiled with.
///
/// Values may be anything that implements [`Serialize`], nested maps and
/// structs are reachable from templates with dot notation:
///
/// ```
/// use mantle::Store;
/// use serde_json::json;
///
/// let store = Store::new().with_must("user", json!({ "name": "Ada" }));
/// let output = mantle::compile("Hello, {{user.name}}!", &store);
///
/// assert_eq!(output.unwrap(), "Hello, Ada!");
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Store {
    data: Map<String, Value>,
}

impl Store {
    /// Create a new, empty [`Store`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Store`] from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the value fails to serialize, or does not
    /// serialize to a map.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::Store;
    /// use serde_json::json;
    ///
    /// let store = Store::from_value(json!({ "title": "Home" })).unwrap();
    /// assert_eq!(store.get("title").unwrap(), "Home");
    ///
    /// assert!(Store::from_value(json!([1, 2, 3])).is_err());
    /// ```
    pub fn from_value<T>(value: T) -> Result<Self, Error>
    where
        T: Serialize,
    {
        match to_value(value).map_err(|e| error_serialize("<root>", e))? {
            Value::Object(data) => Ok(Self { data }),
            other => Err(Error::build("data must be a map")
                .with_kind(ErrorKind::Serialize)
                .with_help(format!("expected a map of keys to values, found `{other}`"))),
        }
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::Store;
    ///
    /// let mut store = Store::new();
    /// let result = store.insert("name", "Ada");
    ///
    /// assert!(result.is_ok());
    /// ```
    pub fn insert<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        let key = key.into();
        let value = to_value(value).map_err(|e| error_serialize(&key, e))?;
        self.data.insert(key, value);

        Ok(())
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    #[inline]
    pub fn insert_must<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Serialize,
    {
        self.data.insert(key.into(), to_value(value).unwrap());
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// Returns the `Store`, so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    #[inline]
    pub fn with<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert(key, value)?;

        Ok(self)
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// Returns the `Store`, so additional methods may be chained.
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    #[inline]
    pub fn with_must<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert_must(key, value);

        self
    }

    /// Returns a reference to the [`Value`] corresponding to the top level key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns true if the [`Store`] holds no data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the top level entries.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::log::ErrorKind;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        name: String,
        age: u8,
    }

    #[test]
    fn test_store_insert() {
        let mut store = Store::new();
        store.insert_must("one", "two");

        assert!(store
            .get("one")
            .is_some_and(|t| t.as_str().unwrap() == "two"));
    }

    #[test]
    fn test_store_insert_fluent() {
        assert!(Store::new()
            .with_must("three", "four")
            .get("three")
            .is_some_and(|t| t.as_str().unwrap() == "four"))
    }

    #[test]
    fn test_store_insert_struct() {
        let store = Store::new().with_must(
            "user",
            User {
                name: "Ada".to_string(),
                age: 36,
            },
        );

        assert_eq!(store.get("user"), Some(&json!({ "name": "Ada", "age": 36 })));
    }

    #[test]
    fn test_store_from_value_rejects_scalars() {
        let error = Store::from_value("just a string").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Serialize);
    }

    #[test]
    fn test_store_insert_unserializable() {
        use std::collections::HashMap;

        // Maps with non-string keys cannot become JSON objects.
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");

        let error = Store::new().insert("pairs", map).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialize);
    }
}
