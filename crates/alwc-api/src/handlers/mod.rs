//! HTTP request handlers grouped by area.

pub mod admin;
pub mod auth;
pub mod board;
pub mod contact;
pub mod content;
pub mod events;
pub mod health;
pub mod images;
pub mod newsletter;
