//! Handlers under `/api/admin`.

pub mod audit;
pub mod profile;
pub mod users;
