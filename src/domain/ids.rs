//! Domain identifier types with validation
//!
//! Catalog identifiers arrive as free text from CSV files and API payloads,
//! so the newtype trims surrounding whitespace once on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MMS ID newtype wrapper
///
/// The stable identifier of a bibliographic record in the Alma catalog.
///
/// # Examples
///
/// ```
/// use bibexport::domain::ids::MmsId;
/// use std::str::FromStr;
///
/// let mms_id = MmsId::from_str(" 991234567890104641 ").unwrap();
/// assert_eq!(mms_id.as_str(), "991234567890104641");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MmsId(String);

impl MmsId {
    /// Creates a new MmsId from a string
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Returns
    ///
    /// Returns `Ok(MmsId)` if the ID is non-empty after trimming, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("MMS ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the MMS ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MmsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MmsId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for MmsId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mms_id_valid() {
        let id = MmsId::new("991234567890104641").unwrap();
        assert_eq!(id.as_str(), "991234567890104641");
        assert_eq!(id.to_string(), "991234567890104641");
    }

    #[test]
    fn test_mms_id_trims() {
        let id = MmsId::new("\t99123\r\n").unwrap();
        assert_eq!(id.into_inner(), "99123");
    }

    #[test]
    fn test_mms_id_empty() {
        assert!(MmsId::new("").is_err());
        assert!(MmsId::new("   ").is_err());
    }

    #[test]
    fn test_mms_id_serialization() {
        let id = MmsId::new("99123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"99123\"");
        let back: MmsId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
