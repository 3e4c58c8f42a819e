//! Callback Endpoint Handler
//!
//! Serves the markup a deferred-load script asks for.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{script, LoadMode};
use crate::error::{BlockCacheError, Result};
use crate::render::{BlockLoader, BlockRenderer, BlockResponse, JAVASCRIPT_CONTENT_TYPE};

// == Callback Handler ==
pub struct CallbackHandler {
    loader: Arc<dyn BlockLoader>,
    renderer: Arc<dyn BlockRenderer>,
}

impl CallbackHandler {
    pub fn new(loader: Arc<dyn BlockLoader>, renderer: Arc<dyn BlockRenderer>) -> Self {
        Self { loader, renderer }
    }

    /// Resolves and renders `block_id` for a client loading in `mode`.
    ///
    /// Sync clients get the rendered HTML as is. Async clients get a script
    /// that injects the HTML into the placeholder. The rendered response is
    /// always marked private. Renderer errors are returned untouched.
    pub async fn respond(&self, block_id: &str, mode: LoadMode) -> Result<BlockResponse> {
        let Some(block) = self.loader.load(block_id).await else {
            warn!(block_id, %mode, "deferred block not found");
            return Err(BlockCacheError::BlockNotFound(block_id.to_string()));
        };

        let mut response = self.renderer.render(&block).await?;
        response.set_private();

        if mode == LoadMode::Sync {
            debug!(block_id, "serving deferred block as html");
            return Ok(response);
        }

        let js = script::inline_replace_script(&block.dashified_id(), response.body());
        response.set_body(js);
        response.set_content_type(JAVASCRIPT_CONTENT_TYPE);
        debug!(block_id, "serving deferred block as script");
        Ok(response)
    }
}
