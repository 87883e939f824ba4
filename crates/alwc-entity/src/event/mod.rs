//! Event and gallery entities.

pub mod image;
pub mod model;

pub use image::{EventImage, NewEventImage};
pub use model::{Event, EventChanges, EventWithImages, NewEvent};
