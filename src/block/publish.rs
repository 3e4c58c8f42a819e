//! Publish Workflow
//!
//! Decides whether a block may be shown at a given instant.

use chrono::{DateTime, Utc};

use super::Block;

/// Capability answering "is this block publishable right now".
pub trait PublishWorkflow: Send + Sync {
    fn is_published(&self, block: &Block, now: DateTime<Utc>) -> bool;
}

// == Publish Window ==
/// Default workflow: the block must be enabled and `now` must fall inside
/// its `[publish_start, publish_end]` interval. Open bounds are unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishWindow;

impl PublishWorkflow for PublishWindow {
    fn is_published(&self, block: &Block, now: DateTime<Utc>) -> bool {
        if !block.is_enabled() {
            return false;
        }
        if block.publish_start().is_some_and(|start| now < start) {
            return false;
        }
        if block.publish_end().is_some_and(|end| now > end) {
            return false;
        }
        true
    }
}
