//! Events and their image galleries.

pub mod gallery;
pub mod service;

pub use gallery::GalleryService;
pub use service::{CreateEventInput, EventService, EventUpdate, OrderUpdate};
