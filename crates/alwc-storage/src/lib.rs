//! # alwc-storage
//!
//! Object storage for uploaded images. The local filesystem provider is
//! always available; the S3 provider is compiled with the `s3` feature.

pub mod factory;
pub mod keys;
pub mod providers;

pub use factory::build_object_store;
pub use keys::ObjectKey;
