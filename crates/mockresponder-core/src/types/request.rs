//! Outgoing request as seen by the registry.

use crate::mocks::context::RequestContext;
use crate::types::method::HttpMethod;
use std::collections::HashMap;

/// HTTP request handed to a client.
///
/// `url` is the fully rendered URL (scheme, host, path and query) that descriptor
/// patterns are tested against. `context` is the carrier returned by
/// [`ResponseRegistry::new`](crate::ResponseRegistry::new); only clients that
/// resolve the registry through the request need it.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub context: Option<RequestContext>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach the carrier that lets context-driven clients find the registry.
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = Some(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_request_builders() {
        let request = Request::post("http://api.local/users")
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"name":"x"}"#);

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://api.local/users");
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body.as_deref(), Some(br#"{"name":"x"}"#.as_slice()));
        assert!(request.context.is_none());
    }

    #[rstest]
    fn test_request_get_has_no_body() {
        let request = Request::get("/bla");
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }
}
