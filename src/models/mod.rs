//! Request and Response models for the block cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing queries and serializing JSON response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::BlockQuery;
pub use responses::{ErrorResponse, HealthResponse};
