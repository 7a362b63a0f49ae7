//! Secure credential handling using the secrecy crate
//!
//! The Alma API key is held in a `Secret<SecretValue>`: memory is zeroed on
//! drop, `Debug` output is redacted, and reading the value requires an
//! explicit `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use bibexport::config::{SecretString, SecretValue};
//! use secrecy::{ExposeSecret, Secret};
//!
//! let api_key: SecretString = Secret::new(SecretValue::from("l8xx-api-key".to_string()));
//! assert_eq!(api_key.expose_secret(), "l8xx-api-key");
//!
//! // Debug output is redacted
//! assert!(!format!("{:?}", api_key).contains("l8xx"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in bytes; safe to log
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Wraps a String in a [`SecretString`]
///
/// ```rust
/// use bibexport::config::secret_string;
///
/// let api_key = secret_string("l8xx-api-key".to_string());
/// ```
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
