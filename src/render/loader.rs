//! In-Memory Block Loader
//!
//! Document store stand-in backed by an ordered list of blocks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::BlockLoader;
use crate::block::{Block, PublishWindow, PublishWorkflow};
use crate::error::{BlockCacheError, Result};

// == In-Memory Block Loader ==
/// Blocks are kept in insertion order, which is also child order.
pub struct InMemoryBlockLoader {
    blocks: RwLock<Vec<Block>>,
    workflow: Arc<dyn PublishWorkflow>,
}

impl InMemoryBlockLoader {
    // == Constructor ==
    /// Creates an empty store that filters with [`PublishWindow`].
    pub fn new() -> Self {
        Self::with_workflow(Arc::new(PublishWindow))
    }

    pub fn with_workflow(workflow: Arc<dyn PublishWorkflow>) -> Self {
        Self {
            blocks: RwLock::new(Vec::new()),
            workflow,
        }
    }

    /// Seeds a store from a JSON array of blocks.
    pub fn from_json(json: &str) -> Result<Self> {
        let blocks: Vec<Block> = serde_json::from_str(json)
            .map_err(|e| BlockCacheError::Internal(format!("invalid block fixtures: {e}")))?;

        Ok(Self {
            blocks: RwLock::new(blocks),
            workflow: Arc::new(PublishWindow),
        })
    }

    // == Insert ==
    /// Adds a block, replacing any stored block with the same id in place.
    pub async fn insert(&self, block: Block) {
        let mut blocks = self.blocks.write().await;
        match blocks.iter_mut().find(|b| b.id() == block.id()) {
            Some(existing) => *existing = block,
            None => blocks.push(block),
        }
    }

    pub async fn len(&self) -> usize {
        self.blocks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blocks.read().await.is_empty()
    }
}

impl Default for InMemoryBlockLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockLoader for InMemoryBlockLoader {
    async fn load(&self, id: &str) -> Option<Block> {
        let now = Utc::now();
        let blocks = self.blocks.read().await;
        let block = blocks.iter().find(|b| b.id() == id)?;

        if !self.workflow.is_published(block, now) {
            debug!(block_id = id, "block exists but is not published");
            return None;
        }
        Some(block.clone())
    }

    async fn children(&self, parent: &Block) -> Vec<Block> {
        if !parent.supports_children() {
            return Vec::new();
        }

        let now = Utc::now();
        let blocks = self.blocks.read().await;
        blocks
            .iter()
            .filter(|b| b.parent_id() == Some(parent.id()))
            .filter(|b| self.workflow.is_published(b, now))
            .cloned()
            .collect()
    }
}
