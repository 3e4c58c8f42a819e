//! Render Module
//!
//! Seams to the collaborators the block cache depends on: the block store,
//! the fragment renderer and the URL builder, each with an in-process
//! implementation.

mod loader;
mod renderer;
mod response;
mod urls;

use async_trait::async_trait;

use crate::block::Block;
use crate::cache::CacheKeys;
use crate::error::Result;

pub use loader::InMemoryBlockLoader;
pub use renderer::{ActionFn, FragmentRenderer};
pub use response::{BlockResponse, HTML_CONTENT_TYPE, JAVASCRIPT_CONTENT_TYPE};
pub use urls::RouteUrlGenerator;

/// Resolves block identifiers against the document store.
#[async_trait]
pub trait BlockLoader: Send + Sync {
    /// Returns the block if it exists and is currently publishable.
    async fn load(&self, id: &str) -> Option<Block>;

    /// Publishable children of `parent` in store order. Empty for variants
    /// that do not support children.
    async fn children(&self, parent: &Block) -> Vec<Block>;
}

/// Turns a block into an HTML response.
#[async_trait]
pub trait BlockRenderer: Send + Sync {
    async fn render(&self, block: &Block) -> Result<BlockResponse>;
}

/// Builds an absolute URL for a named route with the keys as parameters.
pub trait UrlGenerator: Send + Sync {
    fn generate(&self, route: &str, keys: &CacheKeys) -> Result<String>;
}
