//! API Module
//!
//! HTTP handlers and routing for the block cache.
//!
//! # Endpoints
//! - `GET /_block/js/sync` - Deferred-load callback, HTML envelope
//! - `GET /_block/js/async` - Deferred-load callback, script envelope
//! - `GET /blocks/embed` - Placeholder markup for a block
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
