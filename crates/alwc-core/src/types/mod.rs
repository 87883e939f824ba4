//! Core type definitions used across the workspace.

pub mod id;
pub mod pagination;
pub mod response;

pub use id::*;
pub use pagination::ListWindow;
pub use response::{ApiErrorResponse, MessageResponse};
