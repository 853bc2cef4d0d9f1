//! Core request, response and descriptor types.

pub mod descriptor;
pub mod method;
pub mod request;
pub mod response;
