//! Request context carrier.
//!
//! Code that builds requests deep inside an application often cannot be handed a
//! registry directly. [`RequestContext`] travels with each [`Request`](crate::Request)
//! instead and [`RequestContext::resolve`] recovers the registry on the other side.
//! Resolution is the only fallible step of the binding; every failure is a
//! [`FixtureError`].

use crate::mocks::error::FixtureError;
use crate::mocks::registry::ResponseRegistry;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// Key under which the registry handle is stored.
pub(crate) const RESPONDER_KEY: &str = "mockresponder.registry";

type ContextValue = Arc<dyn Any + Send + Sync>;

/// Typed value bag attached to requests.
///
/// The registry is stored as a weak handle, so a carrier outliving its registry
/// resolves to [`FixtureError::NullResponder`].
#[derive(Clone, Default)]
pub struct RequestContext {
    values: HashMap<&'static str, ContextValue>,
}

impl RequestContext {
    /// Empty carrier, resolves to [`FixtureError::MissingContext`].
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn for_registry(registry: &Arc<ResponseRegistry>) -> Self {
        let handle: ContextValue = Arc::new(Arc::downgrade(registry));
        Self::new().with_raw(RESPONDER_KEY, handle)
    }

    /// Attach an application value under `key`.
    ///
    /// Surrounding frameworks use this to thread their own data next to the registry.
    pub fn with_value<T: Any + Send + Sync>(self, key: &'static str, value: T) -> Self {
        self.with_raw(key, Arc::new(value))
    }

    pub fn value<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn with_raw(mut self, key: &'static str, value: ContextValue) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Recover the registry bound to this carrier.
    pub fn resolve(&self) -> Result<Arc<ResponseRegistry>, FixtureError> {
        let value = self
            .values
            .get(RESPONDER_KEY)
            .ok_or(FixtureError::MissingContext)?;
        let handle = value
            .downcast_ref::<Weak<ResponseRegistry>>()
            .ok_or(FixtureError::WrongContextType)?;
        handle.upgrade().ok_or(FixtureError::NullResponder)
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("RequestContext").field("keys", &keys).finish()
    }
}
