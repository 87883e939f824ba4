//! Newsletter subscribers and sending.

pub mod export;
pub mod service;

pub use export::subscribers_csv;
pub use service::{
    NewsletterService, SendNewsletterInput, Subscribed, SubscriberInput, SubscriberUpdate,
};
