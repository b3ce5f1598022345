use serde::{Deserialize, Serialize};

/// Single property entry.
///
/// Both fields are plain UTF-8 strings with no validation applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    /// Property name.
    key: String,
    /// Property value.
    value: String,
}

impl KeyValue {
    /// Create a new key–value pair.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, returning the previous one.
    pub(crate) fn set_value(&mut self, value: String) -> String {
        std::mem::replace(&mut self.value, value)
    }

    /// Split into owned `(key, value)`.
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl From<(String, String)> for KeyValue {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<(&str, &str)> for KeyValue {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyValue;

    #[test]
    fn from_str_tuple_creates_keyvalue() {
        let kv: KeyValue = ("job.class", "EchoJob").into();
        assert_eq!(kv.key(), "job.class");
        assert_eq!(kv.value(), "EchoJob");
    }

    #[test]
    fn into_parts_returns_owned_pair() {
        let kv = KeyValue::new("status", "ok");
        assert_eq!(kv.into_parts(), ("status".to_string(), "ok".to_string()));
    }
}
