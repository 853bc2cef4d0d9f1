//! Dispatch diagnostics.
//!
//! Every registry reports through a [`DispatchObserver`] handed to it at
//! construction. [`TracingObserver`] forwards to `tracing`; [`RecordingObserver`]
//! keeps the events so tests can assert on them.

use crate::types::descriptor::MockResponse;
use crate::types::method::HttpMethod;
use std::sync::{Mutex, PoisonError};

/// Receiver of registry diagnostics.
///
/// URLs passed to the observer are already sanitized.
pub trait DispatchObserver: Send + Sync {
    /// A request reached the matching algorithm.
    fn on_request(&self, _method: HttpMethod, _url: &str) {}

    /// Descriptor `index` was served.
    fn on_served(&self, _method: HttpMethod, _url: &str, _index: usize, _descriptor: &MockResponse) {}

    /// No descriptor matched; `table` is the full descriptor table.
    fn on_exhausted(&self, _method: HttpMethod, _url: &str, _table: &[MockResponse]) {}

    /// Descriptor `index` was never served.
    fn on_unconsumed(&self, _index: usize, _descriptor: &MockResponse) {}
}

/// Observer logging through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn on_request(&self, method: HttpMethod, url: &str) {
        tracing::debug!(%method, url, "mock request");
    }

    fn on_served(&self, method: HttpMethod, url: &str, index: usize, descriptor: &MockResponse) {
        tracing::debug!(
            %method,
            url,
            index,
            status = descriptor.effective_status(),
            descriptor = %descriptor,
            "served mock response"
        );
    }

    fn on_exhausted(&self, method: HttpMethod, url: &str, table: &[MockResponse]) {
        for (index, descriptor) in table.iter().enumerate() {
            tracing::error!(
                index,
                consumed = descriptor.is_consumed(),
                pattern = %descriptor.url,
                status = descriptor.status,
                url,
                body = %String::from_utf8_lossy(&descriptor.body),
                "mock response table"
            );
        }
        tracing::error!(%method, url, "ran out of mock responses");
    }

    fn on_unconsumed(&self, index: usize, descriptor: &MockResponse) {
        tracing::warn!(index, descriptor = %descriptor, "mock response never served");
    }
}

/// One recorded observer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    Request {
        method: HttpMethod,
        url: String,
    },
    Served {
        method: HttpMethod,
        url: String,
        index: usize,
        status: u16,
    },
    Exhausted {
        method: HttpMethod,
        url: String,
        /// `Display` of every descriptor, in table order
        table: Vec<String>,
    },
    Unconsumed {
        index: usize,
        descriptor: String,
    },
}

/// Observer that stores every event.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DispatchEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn record(&self, event: DispatchEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl DispatchObserver for RecordingObserver {
    fn on_request(&self, method: HttpMethod, url: &str) {
        self.record(DispatchEvent::Request {
            method,
            url: url.to_owned(),
        });
    }

    fn on_served(&self, method: HttpMethod, url: &str, index: usize, descriptor: &MockResponse) {
        self.record(DispatchEvent::Served {
            method,
            url: url.to_owned(),
            index,
            status: descriptor.effective_status(),
        });
    }

    fn on_exhausted(&self, method: HttpMethod, url: &str, table: &[MockResponse]) {
        self.record(DispatchEvent::Exhausted {
            method,
            url: url.to_owned(),
            table: table.iter().map(ToString::to_string).collect(),
        });
    }

    fn on_unconsumed(&self, index: usize, descriptor: &MockResponse) {
        self.record(DispatchEvent::Unconsumed {
            index,
            descriptor: descriptor.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        let descriptor = MockResponse::new().with_url("ok$");

        observer.on_request(HttpMethod::Get, "bla://bla/ok");
        observer.on_served(HttpMethod::Get, "bla://bla/ok", 1, &descriptor);
        observer.on_unconsumed(0, &descriptor);

        assert_eq!(
            observer.events(),
            vec![
                DispatchEvent::Request {
                    method: HttpMethod::Get,
                    url: "bla://bla/ok".into(),
                },
                DispatchEvent::Served {
                    method: HttpMethod::Get,
                    url: "bla://bla/ok".into(),
                    index: 1,
                    status: 200,
                },
                DispatchEvent::Unconsumed {
                    index: 0,
                    descriptor: "ok$/0/<none>/false".into(),
                },
            ]
        );

        observer.clear();
        assert!(observer.events().is_empty());
    }

    #[rstest]
    fn test_recording_observer_table_snapshot() {
        let observer = RecordingObserver::new();
        let table = vec![MockResponse::new().with_status(204), MockResponse::new().with_url("x")];

        observer.on_exhausted(HttpMethod::Post, "/y", &table);

        assert_eq!(
            observer.events(),
            vec![DispatchEvent::Exhausted {
                method: HttpMethod::Post,
                url: "/y".into(),
                table: vec!["/204/<none>/false".into(), "x/0/<none>/false".into()],
            }]
        );
    }

    #[rstest]
    fn test_tracing_observer_accepts_all_events() {
        let observer = TracingObserver;
        let descriptor = MockResponse::new().with_body(vec![0xff, b'a']);
        observer.on_request(HttpMethod::Get, "/a");
        observer.on_served(HttpMethod::Get, "/a", 0, &descriptor);
        observer.on_exhausted(HttpMethod::Get, "/a", std::slice::from_ref(&descriptor));
        observer.on_unconsumed(0, &descriptor);
    }
}
