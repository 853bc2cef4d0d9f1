//! Canned HTTP responses for tests.
//!
//! A [`ResponseRegistry`] holds an ordered list of [`MockResponse`] descriptors and
//! serves them back, one per request, in place of a real HTTP client:
//! - descriptors without a URL pattern are served positionally
//! - descriptors with a pattern are served to the first request whose URL matches
//! - every descriptor is served at most once until the registry is reset
//!
//! Misconfigured fixtures (no matching descriptor left, broken pattern, missing
//! request context) abort the calling test with a panic instead of returning an error.

pub mod client;
pub mod config;
pub mod matching;
pub mod mocks;
pub mod observe;
pub mod types;

pub use client::{ContextClient, HttpClient};
pub use mocks::context::RequestContext;
pub use mocks::error::{FixtureError, TransportError};
pub use mocks::registry::{DispatchFn, ResponseRegistry};
pub use observe::{DispatchEvent, DispatchObserver, RecordingObserver, TracingObserver};
pub use types::descriptor::{MockResponse, MockResponseList};
pub use types::method::HttpMethod;
pub use types::request::Request;
pub use types::response::Response;
