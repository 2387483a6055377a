//! Request body handling and JSON decode utilities.

use bytes::Bytes;

use crate::Result;

/// Caller-supplied body value, before the stringify policy is applied.
///
/// Conversions exist for strings, [`serde_json::Value`], and `Option` of
/// either, so `with_body` accepts all of them directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BodyInit {
    /// No body.
    #[default]
    None,
    /// A raw string, always passed through unchanged.
    Text(String),
    /// A structured JSON value.
    Json(serde_json::Value),
}

impl BodyInit {
    /// Build a [`BodyInit::Json`] from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize<T: serde::Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| crate::Error::invalid_request(e.to_string()))?;
        Ok(Self::Json(value))
    }
}

impl From<&str> for BodyInit {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BodyInit {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for BodyInit {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for BodyInit {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Request body in its stored form.
///
/// The stringify policy is applied when the body is set, not when the
/// request is dispatched: with `stringify_body` enabled, structured values
/// are serialized to compact JSON text immediately, strings pass through
/// unchanged, and null collapses to [`Body::Empty`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// A textual body, sent as-is.
    Text(String),
    /// A structured body kept unserialized (`stringify_body = false`).
    Json(serde_json::Value),
}

impl Body {
    pub(crate) fn from_init(init: BodyInit, stringify: bool) -> Self {
        match init {
            BodyInit::None | BodyInit::Json(serde_json::Value::Null) => Self::Empty,
            BodyInit::Text(text) => Self::Text(text),
            // `Display` for `Value` is the compact serialized form
            BodyInit::Json(value) if stringify => Self::Text(value.to_string()),
            BodyInit::Json(value) => Self::Json(value),
        }
    }

    /// Returns `true` when there is no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Textual form, if the body was stringified or set from a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Empty | Self::Json(_) => None,
        }
    }

    /// Structured form, if the body was kept unserialized.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Empty | Self::Text(_) => None,
        }
    }

    /// Wire form handed to the transport.
    #[must_use]
    pub(crate) fn to_bytes(&self) -> Option<Bytes> {
        match self {
            Self::Empty => None,
            Self::Text(text) => Some(Bytes::from(text.clone().into_bytes())),
            Self::Json(value) => Some(Bytes::from(value.to_string().into_bytes())),
        }
    }
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so decode failures name the exact field that
/// failed (e.g., "user.address.city").
///
/// # Errors
///
/// Returns an error if JSON deserialization fails.
///
/// # Example
///
/// ```
/// use grapnel_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let bytes = br#"{"name":"Alice"}"#;
/// let user: User = from_json(bytes).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| crate::Error::json_decode(e.path().to_string(), e.inner().to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stringify_serializes_structured_values() {
        let body = Body::from_init(json!({"name": "Alice"}).into(), true);
        assert_eq!(body.as_text(), Some(r#"{"name":"Alice"}"#));

        let body = Body::from_init(json!([1, 2, 3]).into(), true);
        assert_eq!(body.as_text(), Some("[1,2,3]"));
    }

    #[test]
    fn stringify_passes_strings_through() {
        let body = Body::from_init("raw text".into(), true);
        assert_eq!(body.as_text(), Some("raw text"));

        // Still unchanged when stringify is off
        let body = Body::from_init("raw text".into(), false);
        assert_eq!(body.as_text(), Some("raw text"));
    }

    #[test]
    fn null_collapses_to_empty() {
        assert!(Body::from_init(BodyInit::None, true).is_empty());
        assert!(Body::from_init(json!(null).into(), true).is_empty());
        assert!(Body::from_init(json!(null).into(), false).is_empty());
        assert!(Body::from_init(Option::<String>::None.into(), true).is_empty());
    }

    #[test]
    fn unstringified_body_keeps_structure() {
        let value = json!({"items": [1, 2, 3]});
        let body = Body::from_init(value.clone().into(), false);
        assert_eq!(body.as_json(), Some(&value));
        assert!(body.as_text().is_none());
    }

    #[test]
    fn body_to_bytes() {
        assert!(Body::Empty.to_bytes().is_none());

        let body = Body::from_init(json!({"a": 1}).into(), true);
        assert_eq!(body.to_bytes().expect("bytes").as_ref(), br#"{"a":1}"#);

        let body = Body::from_init(json!({"a": 1}).into(), false);
        assert_eq!(body.to_bytes().expect("bytes").as_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn body_init_serialize() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
        }

        let init = BodyInit::serialize(&User {
            name: "Alice".to_string(),
        })
        .expect("serialize");
        assert_eq!(init, BodyInit::Json(json!({"name": "Alice"})));
    }

    #[test]
    fn from_json_deserialize() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            name: String,
        }

        let user: User = from_json(br#"{"name":"Alice"}"#).expect("deserialize");
        assert_eq!(
            user,
            User {
                name: "Alice".to_string()
            }
        );
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let result: Result<User> = from_json(br#"{"address":{}}"#);
        let err = result.expect_err("should fail");
        let msg = err.to_string();
        assert!(
            msg.contains("address"),
            "Expected path 'address' in error: {msg}"
        );
        assert!(
            msg.contains("city"),
            "Expected field 'city' mentioned in error: {msg}"
        );
    }
}
