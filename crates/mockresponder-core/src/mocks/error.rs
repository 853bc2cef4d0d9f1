//! Error classes of the registry.
//!
//! [`TransportError`] is data: a descriptor configured to fail hands it back to the
//! caller like a real client would. [`FixtureError`] means the test itself is
//! broken and ends the test through [`abort`].

use crate::types::method::HttpMethod;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure served in place of a response.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum TransportError {
    #[error("connection refused: {0}")]
    ConnectionRefused(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn other(message: impl Into<String>) -> Self {
        TransportError::Other(message.into())
    }
}

/// Misconfigured test fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("no mock responder in request context")]
    MissingContext,
    #[error("request context value is not a mock responder")]
    WrongContextType,
    #[error("mock responder in request context no longer exists")]
    NullResponder,
    #[error("invalid URL pattern '{pattern}' in mock response {index}: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("ran out of mock responses for {method} {url}")]
    Exhausted { method: HttpMethod, url: String },
}

/// Raise a fixture error as a test-ending panic.
///
/// Harnesses observe it with `#[should_panic]` or `std::panic::catch_unwind`; the
/// panic message is the error's `Display`, prefixed with `mock responder: `.
pub fn abort(err: FixtureError) -> ! {
    panic!("mock responder: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error as _;

    #[rstest]
    #[case(TransportError::ConnectionRefused("127.0.0.1:80".into()), "connection refused: 127.0.0.1:80")]
    #[case(TransportError::Timeout("30s".into()), "request timed out: 30s")]
    #[case(TransportError::other("ugh"), "ugh")]
    fn test_transport_error_display(#[case] error: TransportError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_transport_error_serde_shape() {
        let error: TransportError =
            serde_json::from_str(r#"{"kind": "connection_refused", "message": "ugh"}"#)
                .expect("Should deserialize");
        assert_eq!(error, TransportError::ConnectionRefused("ugh".into()));

        let json = serde_json::to_value(TransportError::Timeout("1s".into())).unwrap();
        assert_eq!(json["kind"], "timeout");
        assert_eq!(json["message"], "1s");
    }

    #[rstest]
    fn test_fixture_error_display() {
        let error = FixtureError::Exhausted {
            method: HttpMethod::Get,
            url: "bla://bla/auth".into(),
        };
        assert_eq!(
            error.to_string(),
            "ran out of mock responses for GET bla://bla/auth"
        );
        assert!(FixtureError::MissingContext.to_string().contains("context"));
    }

    #[rstest]
    fn test_invalid_pattern_has_source() {
        let source = regex::Regex::new("* * *").unwrap_err();
        let error = FixtureError::InvalidPattern {
            index: 2,
            pattern: "* * *".into(),
            source,
        };
        assert!(error.to_string().contains("'* * *'"));
        assert!(error.to_string().contains("mock response 2"));
        assert!(error.source().is_some());
    }

    #[rstest]
    #[should_panic(expected = "mock responder: no mock responder in request context")]
    fn test_abort_panics_with_message() {
        abort(FixtureError::MissingContext);
    }
}
