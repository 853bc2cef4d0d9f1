//! Registry of canned responses.
//!
//! This module provides `ResponseRegistry`, which serves an ordered table of
//! [`MockResponse`](crate::MockResponse) descriptors back to requests, each descriptor at most once.

use crate::matching::{sanitize_url, url_matches};
use crate::mocks::context::RequestContext;
use crate::mocks::error::{abort, FixtureError, TransportError};
use crate::observe::{DispatchObserver, TracingObserver};
use crate::types::descriptor::MockResponseList;
use crate::types::request::Request;
use crate::types::response::Response;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Replacement for the matching algorithm, same shape as an HTTP client call.
pub type DispatchFn = Arc<dyn Fn(&Request) -> Result<Response, TransportError> + Send + Sync>;

/// Everything guarded by the registry lock.
struct RegistryState {
    /// Descriptor table, never reordered
    responses: MockResponseList,
    /// Index of the descriptor served last, `0` before the first serve
    last_served: usize,
    /// Custom dispatch function, `None` runs the matching algorithm
    dispatch_fn: Option<DispatchFn>,
}

/// Thread-safe registry of canned responses.
///
/// `ResponseRegistry` provides:
/// - Table replacement via `set_responses()`
/// - One-at-a-time serving via `dispatch()`
/// - Reuse within a test via `reset()`
/// - Coverage checks via `all_consumed()`
///
/// Dispatches hold the registry lock for their whole duration, so concurrent
/// callers are served one after another and no descriptor is served twice.
pub struct ResponseRegistry {
    state: Mutex<RegistryState>,
    observer: Arc<dyn DispatchObserver>,
}

impl ResponseRegistry {
    /// Create an empty registry logging through `tracing`, plus the carrier
    /// that binds requests to it.
    pub fn new() -> (Arc<Self>, RequestContext) {
        Self::with_observer(Arc::new(TracingObserver))
    }

    /// Create an empty registry reporting to `observer`.
    pub fn with_observer(observer: Arc<dyn DispatchObserver>) -> (Arc<Self>, RequestContext) {
        let registry = Arc::new(Self {
            state: Mutex::new(RegistryState {
                responses: Vec::new(),
                last_served: 0,
                dispatch_fn: None,
            }),
            observer,
        });
        let context = RequestContext::for_registry(&registry);
        (registry, context)
    }

    /// Mint another carrier bound to this registry.
    pub fn context(self: &Arc<Self>) -> RequestContext {
        RequestContext::for_registry(self)
    }

    /// Replace the descriptor table and mark every entry unserved.
    ///
    /// Callers must finish setup before dispatching from other threads.
    pub fn set_responses(&self, responses: MockResponseList) {
        let mut state = self.lock_state();
        state.responses = responses;
        Self::reset_state(&mut state);
    }

    /// Copy of the current table, consumed flags included.
    pub fn responses(&self) -> MockResponseList {
        self.lock_state().responses.clone()
    }

    /// Mark every descriptor unserved, keeping the table.
    pub fn reset(&self) {
        Self::reset_state(&mut self.lock_state());
    }

    /// Install a function that replaces the matching algorithm.
    ///
    /// It still runs under the registry lock, so it must not call back into the registry.
    pub fn set_dispatch_fn<F>(&self, dispatch_fn: F)
    where
        F: Fn(&Request) -> Result<Response, TransportError> + Send + Sync + 'static,
    {
        self.lock_state().dispatch_fn = Some(Arc::new(dispatch_fn));
    }

    /// Go back to the matching algorithm.
    pub fn clear_dispatch_fn(&self) {
        self.lock_state().dispatch_fn = None;
    }

    pub fn has_custom_dispatch(&self) -> bool {
        self.lock_state().dispatch_fn.is_some()
    }

    /// Serve the next descriptor for `request`.
    ///
    /// Descriptors configured with a failure come back as `Err`. A broken fixture
    /// (no descriptor left, invalid pattern) panics; see [`abort`].
    pub fn dispatch(&self, request: &Request) -> Result<Response, TransportError> {
        match self.try_dispatch(request) {
            Ok(outcome) => outcome,
            Err(err) => abort(err),
        }
    }

    /// Same as [`dispatch`](Self::dispatch), returning fixture errors instead of panicking.
    pub fn try_dispatch(
        &self,
        request: &Request,
    ) -> Result<Result<Response, TransportError>, FixtureError> {
        let mut state = self.lock_state();
        if let Some(dispatch_fn) = state.dispatch_fn.clone() {
            return Ok(dispatch_fn(request));
        }
        self.serve(&mut state, request)
    }

    /// True when every descriptor has been served.
    ///
    /// Reports the first unserved descriptor to the observer.
    pub fn all_consumed(&self) -> bool {
        let state = self.lock_state();
        match state.responses.iter().position(|r| !r.is_consumed()) {
            Some(index) => {
                self.observer.on_unconsumed(index, &state.responses[index]);
                false
            }
            None => true,
        }
    }

    /// Body of the descriptor served last.
    ///
    /// Only meaningful after a successful dispatch; before that it is the body of
    /// the first descriptor, and empty for an empty table.
    pub fn last_served_body(&self) -> Vec<u8> {
        let state = self.lock_state();
        state
            .responses
            .get(state.last_served)
            .map(|r| r.body.clone())
            .unwrap_or_default()
    }

    pub fn last_served_index(&self) -> usize {
        self.lock_state().last_served
    }

    pub fn len(&self) -> usize {
        self.lock_state().responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().responses.is_empty()
    }

    /// Number of descriptors not served yet.
    pub fn remaining(&self) -> usize {
        self.lock_state()
            .responses
            .iter()
            .filter(|r| !r.is_consumed())
            .count()
    }

    /// Recovers the state left behind by a panicking dispatch function.
    fn lock_state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reset_state(state: &mut RegistryState) {
        for response in state.responses.iter_mut() {
            response.clear_consumed();
        }
        state.last_served = 0;
    }

    /// Matching algorithm: the first unserved descriptor whose pattern matches wins.
    fn serve(
        &self,
        state: &mut RegistryState,
        request: &Request,
    ) -> Result<Result<Response, TransportError>, FixtureError> {
        let url = sanitize_url(&request.url);
        self.observer.on_request(request.method, &url);

        let mut found = None;
        for (index, candidate) in state.responses.iter().enumerate() {
            if candidate.is_consumed() {
                continue;
            }
            let matched = url_matches(&candidate.url, &request.url).map_err(|source| {
                FixtureError::InvalidPattern {
                    index,
                    pattern: candidate.url.clone(),
                    source,
                }
            })?;
            if matched {
                found = Some(index);
                break;
            }
        }

        let Some(index) = found else {
            self.observer
                .on_exhausted(request.method, &url, &state.responses);
            return Err(FixtureError::Exhausted {
                method: request.method,
                url,
            });
        };

        state.last_served = index;
        let descriptor = &mut state.responses[index];
        descriptor.mark_consumed();
        self.observer
            .on_served(request.method, &url, index, descriptor);

        if let Some(failure) = &descriptor.failure {
            return Ok(Err(failure.clone()));
        }
        Ok(Ok(Response {
            status: descriptor.effective_status(),
            headers: HashMap::new(),
            body: descriptor.body.clone(),
        }))
    }
}

impl fmt::Debug for ResponseRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("ResponseRegistry")
            .field("responses", &state.responses)
            .field("last_served", &state.last_served)
            .field("custom_dispatch", &state.dispatch_fn.is_some())
            .finish()
    }
}
