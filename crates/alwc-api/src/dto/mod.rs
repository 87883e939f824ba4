//! Data transfer objects for the HTTP boundary.

pub mod request;
pub mod response;
