//! Mock response registry.
//!
//! - [`ResponseRegistry`](registry::ResponseRegistry): ordered descriptor table served once per entry
//! - [`RequestContext`](context::RequestContext): carrier that lets request-driven code find its registry
//! - [`FixtureError`](error::FixtureError) / [`TransportError`](error::TransportError): the two error classes

pub mod context;
pub mod error;
pub mod registry;
