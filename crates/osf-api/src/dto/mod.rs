//! Data transfer objects for API request/response bodies.

pub mod response;
