use crate::{pipe::to_text, store::Store};
use serde_json::Value;
use std::collections::BTreeMap;

/// Nested [`Store`] data reduced to a flat mapping from dot separated
/// paths to leaf values.
///
/// Objects and non-empty arrays are descended, array elements are keyed
/// by their index. Everything else, including empty arrays and objects,
/// is a leaf.
///
/// # Examples
///
/// ```
/// use mantle::{Data, Store};
/// use serde_json::json;
///
/// let store = Store::new()
///     .with_must("user", json!({ "name": "Ada", "tags": ["math", "poetry"] }));
/// let data = Data::flatten(&store);
///
/// assert_eq!(data.text("user.name").as_deref(), Some("Ada"));
/// assert_eq!(data.text("user.tags.1").as_deref(), Some("poetry"));
/// assert!(data.get("user").is_none());
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Data {
    values: BTreeMap<String, Value>,
}

impl Data {
    /// Flatten the given [`Store`].
    pub fn flatten(store: &Store) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in store.iter() {
            flatten_into(key, value, &mut values);
        }

        Self { values }
    }

    /// Returns the leaf [`Value`] at the given dot separated path.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the text of the leaf at the given dot separated path.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(to_text)
    }

    /// Returns the number of leaves.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no leaves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the leaves in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn flatten_into(path: &str, value: &Value, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(object) if !object.is_empty() => {
            for (key, value) in object {
                flatten_into(&format!("{path}.{key}"), value, out);
            }
        }
        Value::Array(array) if !array.is_empty() => {
            for (index, value) in array.iter().enumerate() {
                flatten_into(&format!("{path}.{index}"), value, out);
            }
        }
        _ => {
            out.insert(path.to_string(), value.clone());
        }
    }
}
