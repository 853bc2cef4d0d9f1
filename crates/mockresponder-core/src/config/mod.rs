//! Fixture files holding descriptor tables.
//!
//! A fixture file is a YAML, JSON or JSONC list of [`ResponseFixture`](fixture::ResponseFixture)
//! entries. [`load_responses`](loader::load_responses) reads one file or every file
//! matching a glob and returns the combined table.

pub mod error;
pub mod fixture;
pub mod loader;
pub mod parser;
