//! Response normalization.
//!
//! Whatever a [`crate::Transport`] produces — a response of any status, or
//! an error — is folded into an [`Outcome`]. Callers never branch on
//! transport exceptions; they match on the variant or use the uniform
//! accessors ([`Outcome::ok`], [`Outcome::status`], [`Outcome::is_aborted`],
//! [`Outcome::value`]).

use serde_json::Value;

use crate::{Error, Result, TransportResponse};

/// HTTP status signalling a success with an intentionally empty body.
const NO_CONTENT: u16 = 204;

/// Error payload of a non-2xx response.
#[derive(Debug)]
pub enum ErrorBody {
    /// Decoded JSON error body; an empty object when the body decoded to
    /// null. Only null is promoted: other empty-ish values (`0`, `""`,
    /// `false`) are preserved as decoded.
    Json(Value),
    /// The error body could not be decoded; holds the decode failure.
    Undecodable(Error),
}

impl ErrorBody {
    /// Decoded JSON payload, if the body was decodable.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Undecodable(_) => None,
        }
    }
}

/// Normalized outcome of executing a request.
#[derive(Debug)]
pub enum Outcome {
    /// The transport returned a 2xx response.
    Success {
        /// HTTP status code.
        status: u16,
        /// Decoded JSON body; `Value::Null` for 204 No Content, `None` when
        /// decoding failed.
        value: Option<Value>,
        /// Decode failure on an otherwise successful response. The response
        /// still counts as a success.
        decode_error: Option<Error>,
    },
    /// The transport returned a non-2xx response.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Decoded error payload.
        error: ErrorBody,
    },
    /// The transport call itself failed before producing a response.
    Failed {
        /// The call was cancelled through its token.
        aborted: bool,
        /// The transport failure.
        error: Error,
    },
    /// Rejected locally: another dispatch was in flight and `allow_multiple`
    /// is off. No transport call was made.
    Busy,
}

impl Outcome {
    /// The transport settled with a 2xx response.
    #[must_use]
    pub const fn ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// HTTP status code, when a response was received at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Failed { .. } | Self::Busy => None,
        }
    }

    /// The request never reached settlement on the wire: either cancelled
    /// in flight or refused locally while busy.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Busy | Self::Failed { aborted: true, .. })
    }

    /// Decoded JSON body of a successful response.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value, .. } => value.as_ref(),
            Self::Rejected { .. } | Self::Failed { .. } | Self::Busy => None,
        }
    }

    /// Consume into the decoded JSON body of a successful response.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Success { value, .. } => value,
            Self::Rejected { .. } | Self::Failed { .. } | Self::Busy => None,
        }
    }

    /// Error payload of a non-2xx response.
    #[must_use]
    pub const fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            Self::Success { .. } | Self::Failed { .. } | Self::Busy => None,
        }
    }

    /// The transport failure, when the call itself failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&Error> {
        match self {
            Self::Failed { error, .. } => Some(error),
            Self::Success { .. } | Self::Rejected { .. } | Self::Busy => None,
        }
    }
}

/// Fold a transport settlement into an [`Outcome`].
pub(crate) fn normalize(result: Result<TransportResponse>, diagnostics: bool) -> Outcome {
    match result {
        Ok(response) => normalize_response(&response, diagnostics),
        Err(error) => normalize_failure(error, diagnostics),
    }
}

fn normalize_response(response: &TransportResponse, diagnostics: bool) -> Outcome {
    let status = response.status();
    if response.ok() {
        if status == NO_CONTENT {
            return Outcome::Success {
                status,
                value: Some(Value::Null),
                decode_error: None,
            };
        }
        match response.json::<Value>() {
            Ok(value) => Outcome::Success {
                status,
                value: Some(value),
                decode_error: None,
            },
            Err(error) => Outcome::Success {
                status,
                value: None,
                decode_error: Some(error),
            },
        }
    } else {
        let error = match response.json::<Value>() {
            Ok(Value::Null) => ErrorBody::Json(Value::Object(serde_json::Map::new())),
            Ok(value) => ErrorBody::Json(value),
            Err(error) => ErrorBody::Undecodable(error),
        };
        if diagnostics {
            tracing::error!(status, ?error, "request rejected");
        }
        Outcome::Rejected { status, error }
    }
}

fn normalize_failure(error: Error, diagnostics: bool) -> Outcome {
    let aborted = error.is_aborted();
    // Cancellation is expected, not exceptional
    if !aborted && diagnostics {
        tracing::error!(%error, "transport failure");
    }
    Outcome::Failed { aborted, error }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse::new(status, HashMap::new(), Bytes::from(body.to_string()))
    }

    #[test]
    fn success_decodes_json_body() {
        let outcome = normalize(Ok(response(200, r#"{"id":1}"#)), false);

        assert!(outcome.ok());
        assert_eq!(outcome.status(), Some(200));
        assert!(!outcome.is_aborted());
        assert_eq!(outcome.value(), Some(&json!({"id": 1})));
    }

    #[test]
    fn no_content_yields_null_without_decoding() {
        // Body content is irrelevant for 204
        let outcome = normalize(Ok(response(204, "definitely not json")), false);

        assert!(outcome.ok());
        assert_eq!(outcome.status(), Some(204));
        assert_eq!(outcome.value(), Some(&Value::Null));
    }

    #[test]
    fn success_with_undecodable_body_is_partial() {
        let outcome = normalize(Ok(response(200, "not json")), false);

        assert!(outcome.ok());
        assert!(outcome.value().is_none());
        let Outcome::Success { decode_error, .. } = outcome else {
            panic!("expected success");
        };
        assert!(decode_error.is_some());
    }

    #[test]
    fn rejection_decodes_error_body() {
        let outcome = normalize(Ok(response(400, r#"{"msg":"bad"}"#)), false);

        assert!(!outcome.ok());
        assert_eq!(outcome.status(), Some(400));
        assert!(!outcome.is_aborted());
        assert!(outcome.value().is_none());
        let error = outcome.error_body().expect("error body");
        assert_eq!(error.as_json(), Some(&json!({"msg": "bad"})));
    }

    #[test]
    fn rejection_null_body_promotes_to_empty_object() {
        let outcome = normalize(Ok(response(500, "null")), false);

        let error = outcome.error_body().expect("error body");
        assert_eq!(error.as_json(), Some(&json!({})));
    }

    #[test]
    fn rejection_keeps_other_empty_ish_bodies_as_decoded() {
        for body in ["0", "\"\"", "false"] {
            let outcome = normalize(Ok(response(500, body)), false);
            let error = outcome.error_body().expect("error body");
            let expected: Value = serde_json::from_str(body).expect("valid JSON");
            assert_eq!(error.as_json(), Some(&expected));
        }
    }

    #[test]
    fn rejection_undecodable_body_captures_decode_error() {
        let outcome = normalize(Ok(response(502, "<html>oops</html>")), false);

        let error = outcome.error_body().expect("error body");
        assert!(error.as_json().is_none());
        assert!(matches!(error, ErrorBody::Undecodable(_)));
    }

    #[test]
    fn aborted_failure_maps_to_is_aborted() {
        let outcome = normalize(Err(Error::Aborted), false);

        assert!(!outcome.ok());
        assert!(outcome.is_aborted());
        assert_eq!(outcome.status(), None);
        assert!(outcome.failure().is_some_and(Error::is_aborted));
    }

    #[test]
    fn connection_failure_is_not_aborted() {
        let outcome = normalize(Err(Error::connection("refused")), true);

        assert!(!outcome.ok());
        assert!(!outcome.is_aborted());
        assert!(outcome.failure().is_some_and(Error::is_connection));
    }

    #[test]
    fn busy_reads_as_aborted_with_no_status() {
        let outcome = Outcome::Busy;

        assert!(!outcome.ok());
        assert!(outcome.is_aborted());
        assert_eq!(outcome.status(), None);
        assert!(outcome.value().is_none());
        assert!(outcome.error_body().is_none());
    }
}
