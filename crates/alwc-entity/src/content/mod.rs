//! Editable page content blocks.

pub mod model;

pub use model::SiteContent;
