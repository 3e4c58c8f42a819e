//! Block Cache - deferred rendering of content blocks
//!
//! Serves blocks either inline or as placeholders that load their markup
//! through a follow-up script, synchronously or asynchronously.

pub mod api;
pub mod block;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod render;

pub use api::AppState;
pub use config::Config;
