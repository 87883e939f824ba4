//! Newsletter subscriber entities.

pub mod model;
pub mod status;

pub use model::{Subscriber, SubscriberChanges};
pub use status::SubscriberStatus;
