//! HTTP integration tests driving the full router against the in-memory
//! store.

mod helpers;

mod admin_test;
mod auth_test;
mod content_test;
mod event_test;
mod newsletter_test;
mod operations_test;
