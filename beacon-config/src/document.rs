//! Parsed configuration document
//!
//! A `Document` is the in-memory form of one JSON configuration file:
//! an ordered list of `(key, value)` entries with typed lookups. It
//! lives only for the duration of one load call — consumers copy the
//! fields they care about into their own state and let it drop.

use alloc::vec::Vec;
use heapless::String;

/// Maximum length of a field key
pub const MAX_KEY_LEN: usize = 24;

/// Maximum length of a string value
pub const MAX_STRING_LEN: usize = 64;

/// A field key
pub type Key = String<MAX_KEY_LEN>;

/// A string field value
pub type StrValue = String<MAX_STRING_LEN>;

/// Parse-time size bounds for a configuration document
///
/// Every bound is enforced while parsing; exceeding any of them fails
/// the parse rather than truncating the document. The defaults are
/// sized for a typical small device configuration file (11 fields,
/// 210 bytes of string storage).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DocumentBudget {
    /// Maximum raw document length in bytes
    pub max_document_len: usize,
    /// Maximum number of fields, entries of nested objects included
    pub max_fields: usize,
    /// Maximum cumulative string bytes across keys and string values
    pub max_string_bytes: usize,
}

impl Default for DocumentBudget {
    fn default() -> Self {
        Self {
            max_document_len: 1024,
            max_fields: 11,
            max_string_bytes: 210,
        }
    }
}

/// One decoded configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String value, bounded by `MAX_STRING_LEN`
    Str(StrValue),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f32),
    /// Boolean value
    Bool(bool),
    /// Explicit null
    Null,
    /// Nested object
    Object(Document),
}

impl Value {
    /// Get the value as a string slice, if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a float
    ///
    /// Integers coerce, so a config that writes `"scale": 2` instead
    /// of `"scale": 2.0` still reads back.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Get the value as a boolean, if it is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a nested object, if it is one
    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Value::Object(doc) => Some(doc),
            _ => None,
        }
    }

    /// Check whether the value is an explicit null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Parsed configuration document
///
/// Entries keep their source order. If a key appears more than once
/// the last occurrence wins on lookup, matching how most JSON readers
/// resolve duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(Key, Value)>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry (used by the parser)
    pub(crate) fn push(&mut self, key: Key, value: Value) {
        self.entries.push((key, value));
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Check whether a field is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up a string field
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up an integer field
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Look up a float field (integers coerce)
    pub fn float(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(Value::as_float)
    }

    /// Look up a boolean field
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Look up a nested object field
    pub fn object(&self, key: &str) -> Option<&Document> {
        self.get(key).and_then(Value::as_object)
    }

    /// Number of entries in this object (not counting nested entries)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the document has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        let mut k = Key::new();
        k.push_str(s).unwrap();
        k
    }

    fn sval(s: &str) -> Value {
        let mut v = StrValue::new();
        v.push_str(s).unwrap();
        Value::Str(v)
    }

    #[test]
    fn test_typed_lookups() {
        let mut doc = Document::new();
        doc.push(key("name"), sval("lora-1"));
        doc.push(key("channel"), Value::Int(7));
        doc.push(key("gain"), Value::Float(1.5));
        doc.push(key("debug"), Value::Bool(true));

        assert_eq!(doc.str("name"), Some("lora-1"));
        assert_eq!(doc.int("channel"), Some(7));
        assert_eq!(doc.float("gain"), Some(1.5));
        assert_eq!(doc.bool("debug"), Some(true));
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let mut doc = Document::new();
        doc.push(key("channel"), Value::Int(7));

        assert_eq!(doc.str("channel"), None); // wrong type
        assert_eq!(doc.int("absent"), None); // missing
        assert!(!doc.contains("absent"));
        assert!(doc.contains("channel"));
    }

    #[test]
    fn test_int_coerces_to_float() {
        let mut doc = Document::new();
        doc.push(key("scale"), Value::Int(2));
        assert_eq!(doc.float("scale"), Some(2.0));
        assert_eq!(doc.int("scale"), Some(2));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let mut doc = Document::new();
        doc.push(key("channel"), Value::Int(1));
        doc.push(key("channel"), Value::Int(9));
        assert_eq!(doc.int("channel"), Some(9));
    }

    #[test]
    fn test_nested_object_lookup() {
        let mut inner = Document::new();
        inner.push(key("host"), sval("10.0.0.1"));
        let mut doc = Document::new();
        doc.push(key("uplink"), Value::Object(inner));

        let uplink = doc.object("uplink").unwrap();
        assert_eq!(uplink.str("host"), Some("10.0.0.1"));
        assert!(doc.str("uplink").is_none());
    }

    #[test]
    fn test_null_is_present_but_typeless() {
        let mut doc = Document::new();
        doc.push(key("alias"), Value::Null);
        assert!(doc.contains("alias"));
        assert!(doc.get("alias").unwrap().is_null());
        assert_eq!(doc.str("alias"), None);
    }
}
