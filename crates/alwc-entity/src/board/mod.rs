//! Board member listing.

pub mod model;

pub use model::{BoardMember, BoardMemberChanges, NewBoardMember};
