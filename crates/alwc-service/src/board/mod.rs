//! Board member listings.

pub mod service;

pub use service::{BoardMemberInput, BoardMemberUpdate, BoardService};
