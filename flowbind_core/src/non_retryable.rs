//! Fatal workflow errors that must not be retried.
//!
//! Errors raised inside a workflow reach the engine as serialized data, so
//! the engine cannot tell a [`NonRetryableError`] apart from any other error
//! by its type. Instead every value carries a `__brand` field holding a
//! fixed string, and the engine compares that field by value.
//!
//! The marker is private: it cannot be passed to a constructor or changed
//! afterwards, and a payload whose `__brand` is missing or different does
//! not deserialize into a [`NonRetryableError`].
//!
//! Callers that want their own fatal error types implement [`FatalError`],
//! which supplies a display name and converts into a marked value.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Value of the `__brand` field checked by the engine
pub const NON_RETRYABLE_BRAND: &str = "NonRetryableError";
/// Name of the marker field on the wire
pub const BRAND_FIELD: &str = "__brand";
/// Display name used when none is given
pub const DEFAULT_NAME: &str = "NonRetryableError";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Brand;

impl Serialize for Brand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(NON_RETRYABLE_BRAND)
    }
}

impl<'de> Deserialize<'de> for Brand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == NON_RETRYABLE_BRAND {
            Ok(Brand)
        } else {
            Err(de::Error::invalid_value(
                de::Unexpected::Str(&value),
                &NON_RETRYABLE_BRAND,
            ))
        }
    }
}

/// An error that makes a workflow instance fail immediately without retry
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{name}: {message}")]
pub struct NonRetryableError {
    message: String,
    name: String,
    #[serde(rename = "__brand")]
    brand: Brand,
}

impl NonRetryableError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::named(message, DEFAULT_NAME)
    }

    /// Create with a custom display name. The marker is unaffected.
    pub fn named(message: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: name.into(),
            brand: Brand,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &'static str {
        NON_RETRYABLE_BRAND
    }

    /// Check an arbitrary serialized error for the marker
    pub fn is_marked(value: &Value) -> bool {
        value.get(BRAND_FIELD).and_then(Value::as_str) == Some(NON_RETRYABLE_BRAND)
    }

    /// Recover a marked error from a serialized payload
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

/// Caller-defined fatal error types.
///
/// Implementors pick the name shown by the engine; the conversion always
/// yields a marked [`NonRetryableError`].
pub trait FatalError: std::error::Error {
    fn fatal_name(&self) -> &str;

    fn to_non_retryable(&self) -> NonRetryableError {
        NonRetryableError::named(self.to_string(), self.fatal_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Error)]
    #[error("card declined: {0}")]
    struct PaymentDeclined(String);

    impl FatalError for PaymentDeclined {
        fn fatal_name(&self) -> &str {
            "PaymentDeclined"
        }
    }

    #[test]
    fn test_default_name() {
        let err = NonRetryableError::new("bad input");
        assert_eq!(err.name(), DEFAULT_NAME);
        assert_eq!(err.to_string(), "NonRetryableError: bad input");
    }

    #[test]
    fn test_custom_name_keeps_marker() {
        let err = NonRetryableError::named("quota exhausted", "QuotaError");
        assert_eq!(err.brand(), NON_RETRYABLE_BRAND);

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({
                "message": "quota exhausted",
                "name": "QuotaError",
                "__brand": "NonRetryableError",
            })
        );
        assert!(NonRetryableError::is_marked(&value));
        assert_eq!(NonRetryableError::from_value(value), Some(err));
    }

    #[test]
    fn test_fatal_error_conversion() {
        let fatal = PaymentDeclined("insufficient funds".into()).to_non_retryable();
        assert_eq!(fatal.name(), "PaymentDeclined");
        assert_eq!(fatal.message(), "card declined: insufficient funds");
        assert!(NonRetryableError::is_marked(&serde_json::to_value(&fatal).unwrap()));
    }

    #[test]
    fn test_unmarked_payloads_are_rejected() {
        let plain = json!({ "message": "boom", "name": "Error" });
        assert!(!NonRetryableError::is_marked(&plain));
        assert!(NonRetryableError::from_value(plain).is_none());

        let forged = json!({ "message": "boom", "name": "Error", "__brand": "Retryable" });
        assert!(!NonRetryableError::is_marked(&forged));
        assert!(NonRetryableError::from_value(forged).is_none());
    }
}
