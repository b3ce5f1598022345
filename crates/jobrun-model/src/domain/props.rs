use std::{collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{KeyValue, ModelError, ModelResult};

/// Ordered string-to-string property set.
///
/// Keys are unique. Re-inserting an existing key replaces its value but keeps
/// the position it was first inserted at, so iteration follows file order.
///
/// Serialized as a JSON object whose members keep that order.
#[derive(Debug, Clone, Default)]
pub struct Props {
    entries: Vec<KeyValue>,
    /// Key to position in `entries`.
    index: HashMap<String, usize>,
}

impl Props {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].value())
    }

    /// Get the value for a key, or `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Get a value that must be present and non-blank.
    pub fn require(&self, key: &'static str) -> ModelResult<&str> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ModelError::MissingKey(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or overwrite a property.
    ///
    /// Returns the previous value, if any.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(self.entries[pos].set_value(value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(KeyValue::new(key, value));
                None
            }
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|kv| kv.key())
    }

    /// Overlay `other` on top of `self`; entries from `other` win.
    pub fn merged(&self, other: &Props) -> Props {
        let mut out = self.clone();
        out.extend(other.iter().cloned());
        out
    }

    /// Copy the entries into an unordered map.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|kv| (kv.key().to_string(), kv.value().to_string()))
            .collect()
    }
}

// The index is derived from `entries`, so equality only looks at the entries.
impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Props {}

impl Extend<KeyValue> for Props {
    fn extend<T: IntoIterator<Item = KeyValue>>(&mut self, iter: T) {
        for kv in iter {
            let (k, v) = kv.into_parts();
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut props = Props::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

impl IntoIterator for Props {
    type Item = KeyValue;
    type IntoIter = std::vec::IntoIter<KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Props(len={})", self.len())
    }
}

impl Serialize for Props {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for kv in self.iter() {
            map.serialize_entry(kv.key(), kv.value())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Props {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PropsVisitor;

        impl<'de> Visitor<'de> for PropsVisitor {
            type Value = Props;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with string values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut props = Props::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    props.insert(k, v);
                }
                Ok(props)
            }
        }

        deserializer.deserialize_map(PropsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::Props;

    #[test]
    fn insert_keeps_first_position_and_last_value() {
        let mut props = Props::new();
        props.insert("a", "1");
        props.insert("b", "2");
        let old = props.insert("a", "3");

        assert_eq!(old.as_deref(), Some("1"));
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(props.get("a"), Some("3"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn lookups_stay_consistent_across_many_keys() {
        let props: Props = (0..2_000)
            .map(|i| (format!("key.{i}"), i.to_string()))
            .chain((0..2_000).step_by(2).map(|i| (format!("key.{i}"), "even".to_string())))
            .collect();

        assert_eq!(props.len(), 2_000);
        assert_eq!(props.get("key.10"), Some("even"));
        assert_eq!(props.get("key.11"), Some("11"));
        assert!(props.contains_key("key.1999"));
        assert!(!props.contains_key("key.2000"));
        assert_eq!(props.keys().nth(1_500), Some("key.1500"));
    }

    #[test]
    fn get_or_falls_back_to_default() {
        let props: Props = [("method.run", "execute")].into_iter().collect();
        assert_eq!(props.get_or("method.run", "run"), "execute");
        assert_eq!(props.get_or("method.cancel", "cancel"), "cancel");
    }

    #[test]
    fn require_rejects_missing_and_blank() {
        let props: Props = [("job.class", "EchoJob"), ("blank", "  ")].into_iter().collect();
        assert_eq!(props.require("job.class").unwrap(), "EchoJob");
        assert!(props.require("blank").is_err());
        assert!(props.require("absent").is_err());
    }

    #[test]
    fn merged_overrides_and_appends() {
        let base: Props = [("a", "1"), ("b", "2")].into_iter().collect();
        let top: Props = [("b", "x"), ("c", "3")].into_iter().collect();

        let merged = base.merged(&top);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(merged.get("b"), Some("x"));
    }

    #[test]
    fn to_map_copies_every_entry() {
        let props: Props = [("a", "1"), ("b", "2")].into_iter().collect();
        let map = props.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn serde_preserves_order() {
        let props: Props = [("zeta", "1"), ("alpha", "2"), ("mid", "3")]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2","mid":"3"}"#);

        let back: Props = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }

    #[test]
    fn serde_rejects_non_string_values() {
        let res = serde_json::from_str::<Props>(r#"{"a":1}"#);
        assert!(res.is_err());
    }
}
