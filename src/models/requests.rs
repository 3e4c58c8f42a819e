//! Request DTOs for the block cache API
//!
//! Defines the structure of incoming query strings.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Query of the deferred-load callbacks and the embed endpoint.
///
/// # Fields
/// - `block_id`: Identifier of the block to resolve
/// - everything else (`updated_at`, `locale`, ...) only varies the URL and
///   is kept for logging
#[derive(Debug, Clone, Deserialize)]
pub struct BlockQuery {
    /// The block identifier
    #[serde(default)]
    pub block_id: Option<String>,
    /// Remaining cache key parameters
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl BlockQuery {
    /// Returns the block id, or an error message when it is absent or empty.
    pub fn block_id(&self) -> Result<&str, String> {
        match self.block_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err("Query parameter `block_id` is required".to_string()),
        }
    }
}
