//! Descriptor entries as written in fixture files.

use crate::mocks::error::TransportError;
use crate::types::descriptor::MockResponse;
use serde::{Deserialize, Serialize};

/// One fixture entry.
///
/// ```yaml
/// - url: "auth$"
///   error: { kind: connection_refused, message: "ugh" }
/// - url: "ok$"
///   body: "OK"
/// - status: 204
/// - json: { "hello": "world" }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseFixture {
    /// URL pattern (regular expression)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP status code, 200 when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Raw text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// JSON body, serialized compactly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<serde_json::Value>,
    /// Failure served instead of a response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TransportError>,
}

impl ResponseFixture {
    /// Build the descriptor; `Err` carries the reason the entry is inconsistent.
    pub fn into_response(self) -> Result<MockResponse, String> {
        let body = match (self.body, self.json) {
            (Some(_), Some(_)) => return Err("both `body` and `json` are set".to_owned()),
            (Some(body), None) => body.into_bytes(),
            (None, Some(json)) => serde_json::to_vec(&json).map_err(|e| e.to_string())?,
            (None, None) => Vec::new(),
        };

        let mut response = MockResponse::new()
            .with_body(body)
            .with_status(self.status.unwrap_or_default())
            .with_url(self.url.unwrap_or_default());
        response.failure = self.error;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_fixture_with_text_body() {
        let fixture = ResponseFixture {
            url: Some("ok$".into()),
            body: Some("OK".into()),
            ..Default::default()
        };
        let response = fixture.into_response().unwrap();
        assert_eq!(response.body, b"OK");
        assert_eq!(response.url, "ok$");
        assert_eq!(response.effective_status(), 200);
        assert!(response.failure.is_none());
    }

    #[rstest]
    fn test_fixture_with_json_body() {
        let fixture = ResponseFixture {
            status: Some(201),
            json: Some(json!({"id": 7})),
            ..Default::default()
        };
        let response = fixture.into_response().unwrap();
        assert_eq!(response.body, br#"{"id":7}"#);
        assert_eq!(response.status, 201);
        assert!(!response.has_pattern());
    }

    #[rstest]
    fn test_fixture_with_error() {
        let fixture: ResponseFixture = serde_json::from_str(
            r#"{"url": "auth$", "error": {"kind": "other", "message": "ugh"}}"#,
        )
        .expect("Should deserialize");
        let response = fixture.into_response().unwrap();
        assert_eq!(response.failure, Some(TransportError::other("ugh")));
        assert!(response.body.is_empty());
    }

    #[rstest]
    fn test_fixture_rejects_two_bodies() {
        let fixture = ResponseFixture {
            body: Some("a".into()),
            json: Some(json!("a")),
            ..Default::default()
        };
        assert!(fixture.into_response().unwrap_err().contains("both"));
    }

    #[rstest]
    fn test_fixture_rejects_unknown_fields() {
        let result: Result<ResponseFixture, _> = serde_json::from_str(r#"{"code": 200}"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case("url")]
    #[case("status")]
    #[case("body")]
    #[case("json")]
    #[case("error")]
    fn test_fixture_optional_fields_omitted(#[case] field: &str) {
        let json = serde_json::to_string(&ResponseFixture::default()).expect("Should serialize");
        assert_eq!(json, "{}");
        assert!(!json.contains(field));
    }
}
