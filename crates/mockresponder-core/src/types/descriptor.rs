//! Canned response descriptors.

use crate::mocks::error::TransportError;
use std::fmt;

/// Status served when a descriptor leaves `status` at zero.
pub const DEFAULT_STATUS: u16 = 200;

/// One canned response.
///
/// When `url` is empty the descriptor matches any request; otherwise it is a
/// regular expression searched for in the request URL. A descriptor carrying a
/// `failure` is served as that error instead of a response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MockResponse {
    /// Raw response body
    pub body: Vec<u8>,
    /// Response status, `0` means [`DEFAULT_STATUS`]
    pub status: u16,
    /// URL pattern (regular expression), empty matches anything
    pub url: String,
    /// Error returned instead of a response
    pub failure: Option<TransportError>,
    consumed: bool,
}

/// Ordered descriptor table. Position defines match priority.
pub type MockResponseList = Vec<MockResponse>;

impl MockResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_url(mut self, pattern: impl Into<String>) -> Self {
        self.url = pattern.into();
        self
    }

    pub fn with_failure(mut self, failure: TransportError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn effective_status(&self) -> u16 {
        if self.status == 0 {
            DEFAULT_STATUS
        } else {
            self.status
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn has_pattern(&self) -> bool {
        !self.url.is_empty()
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    pub(crate) fn clear_consumed(&mut self) {
        self.consumed = false;
    }
}

impl fmt::Display for MockResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            Some(err) => write!(f, "{}/{}/{}/{}", self.url, self.status, err, self.consumed),
            None => write!(f, "{}/{}/<none>/{}", self.url, self.status, self.consumed),
        }
    }
}
