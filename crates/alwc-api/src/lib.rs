//! # alwc-api
//!
//! HTTP API layer for the ALWC site built on Axum.
//!
//! Provides the REST endpoints, guard extractors (signed in, elevated,
//! primary admin), middleware (logging, CORS, rate limiting, security
//! headers), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, connect_store, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
