//! HTTP client seam.
//!
//! Application code depends on [`HttpClient`]; tests hand it a
//! [`ResponseRegistry`] directly, or a [`ContextClient`] when requests already
//! carry a [`RequestContext`](crate::RequestContext).

use crate::mocks::error::{abort, FixtureError, TransportError};
use crate::mocks::registry::ResponseRegistry;
use crate::types::request::Request;
use crate::types::response::Response;
use std::sync::Arc;

/// Execute a request and return its response or a transport failure.
pub trait HttpClient: Send + Sync {
    fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

impl HttpClient for ResponseRegistry {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        self.dispatch(&request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        (**self).execute(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        (**self).execute(request)
    }
}

/// Client that finds its registry through each request's context.
///
/// A request without a context, or whose context does not hold a live registry,
/// ends the test; see [`abort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextClient;

impl ContextClient {
    pub fn new() -> Self {
        Self
    }

    fn registry_for(request: &Request) -> Result<Arc<ResponseRegistry>, FixtureError> {
        request
            .context
            .as_ref()
            .ok_or(FixtureError::MissingContext)?
            .resolve()
    }
}

impl HttpClient for ContextClient {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        match Self::registry_for(&request) {
            Ok(registry) => registry.dispatch(&request),
            Err(err) => abort(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::context::RequestContext;
    use crate::types::descriptor::MockResponse;
    use rstest::rstest;

    /// Application code written against the seam.
    fn fetch_greeting(client: &dyn HttpClient, context: Option<RequestContext>) -> String {
        let mut request = Request::get("http://api.local/greeting");
        request.context = context;
        match client.execute(request) {
            Ok(response) => response.text().into_owned(),
            Err(err) => format!("error: {err}"),
        }
    }

    #[rstest]
    fn test_registry_as_client() {
        let (registry, _context) = ResponseRegistry::new();
        registry.set_responses(vec![
            MockResponse::new().with_body("hello"),
            MockResponse::new().with_failure(TransportError::Timeout("5s".into())),
        ]);

        assert_eq!(fetch_greeting(&registry, None), "hello");
        assert_eq!(
            fetch_greeting(&registry, None),
            "error: request timed out: 5s"
        );
        assert!(registry.all_consumed());
    }

    #[rstest]
    fn test_context_client_resolves_registry() {
        let (registry, context) = ResponseRegistry::new();
        registry.set_responses(vec![MockResponse::new().with_body("hi").with_url("greeting$")]);

        assert_eq!(fetch_greeting(&ContextClient::new(), Some(context)), "hi");
        assert!(registry.all_consumed());
    }

    #[rstest]
    #[should_panic(expected = "no mock responder in request context")]
    fn test_context_client_without_context() {
        fetch_greeting(&ContextClient::new(), None);
    }

    #[rstest]
    #[should_panic(expected = "no mock responder in request context")]
    fn test_context_client_with_empty_context() {
        fetch_greeting(&ContextClient::new(), Some(RequestContext::new()));
    }

    #[rstest]
    #[should_panic(expected = "request context value is not a mock responder")]
    fn test_context_client_with_wrong_context_type() {
        let context = RequestContext::new()
            .with_value(crate::mocks::context::RESPONDER_KEY, String::from("not a registry"));
        fetch_greeting(&ContextClient::new(), Some(context));
    }

    #[rstest]
    #[should_panic(expected = "no longer exists")]
    fn test_context_client_after_registry_dropped() {
        let (registry, context) = ResponseRegistry::new();
        drop(registry);
        fetch_greeting(&ContextClient::new(), Some(context));
    }
}
