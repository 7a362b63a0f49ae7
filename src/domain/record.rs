//! Bibliographic record as delivered by the catalog API
//!
//! The API returns loosely-typed JSON whose shape varies with the source
//! system and cataloguing era. `BibliographicRecord` keeps the raw object and
//! offers tolerant accessors; nothing here fails on unexpected shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One bibliographic record, keyed by attribute name
///
/// # Examples
///
/// ```
/// use bibexport::domain::BibliographicRecord;
/// use serde_json::json;
///
/// let record = BibliographicRecord::from_value(json!({
///     "mms_id": "99123",
///     "title": "  A Title  ",
///     "anies": ["<record/>"]
/// }))
/// .unwrap();
///
/// assert_eq!(record.mms_id().as_deref(), Some("99123"));
/// assert_eq!(record.attr("title").as_deref(), Some("  A Title  "));
/// assert!(record.has_anies());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BibliographicRecord {
    fields: Map<String, Value>,
}

impl BibliographicRecord {
    /// Wraps an attribute map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Raw attribute value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the attribute key is present at all
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Scalar attribute rendered as text
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON text
    /// form. `null`, arrays and objects count as absent.
    pub fn attr(&self, name: &str) -> Option<String> {
        scalar_text(self.fields.get(name)?)
    }

    /// The record's MMS ID attribute, untrimmed
    pub fn mms_id(&self) -> Option<String> {
        self.attr("mms_id")
    }

    /// Text of the first `anies` entry
    ///
    /// `anies` is normally an array of XML strings; a bare string is
    /// accepted as a single entry.
    pub fn anies_document(&self) -> Option<&str> {
        match self.fields.get("anies")? {
            Value::Array(items) => items.first()?.as_str(),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether the record carries any embedded descriptive metadata
    pub fn has_anies(&self) -> bool {
        match self.fields.get("anies") {
            None | Some(Value::Null) => false,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(_)) => true,
        }
    }

    /// Consumes self and returns the attribute map
    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for BibliographicRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Textual form of a JSON scalar
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
