//! Tower/axum middleware: logging, CORS, throttling, security headers.

pub mod cors;
pub mod logging;
pub mod rate_limit;
pub mod security;

pub use cors::build_cors_layer;
pub use logging::request_logging;
pub use rate_limit::{RateLimiter, RateLimits};
pub use security::security_headers;
