//! Cache Gateway
//!
//! A cache adapter that never stores anything: every lookup answers with a
//! placeholder whose script fetches the block's markup later.

use std::sync::Arc;

use tracing::debug;

use super::{script, CacheElement, CacheKeys, CachePayload, LoadMode, DEFAULT_TTL};
use crate::block::dashify;
use crate::error::Result;
use crate::render::{BlockResponse, UrlGenerator};

// == Cache Adapter ==
/// The contract a block rendering pipeline uses to consult a cache.
pub trait CacheAdapter: Send + Sync {
    /// Whether the adapter can produce a response for `keys`.
    fn has(&self, keys: &CacheKeys) -> bool;

    fn get(&self, keys: &CacheKeys) -> Result<CacheElement>;

    /// Wraps `data` in an element. `ttl` defaults to [`DEFAULT_TTL`].
    fn set(
        &self,
        keys: &CacheKeys,
        data: CachePayload,
        ttl: Option<u64>,
        contextual_keys: Vec<String>,
    ) -> Result<CacheElement>;

    fn flush(&self, keys: &CacheKeys) -> bool;

    fn flush_all(&self) -> bool;

    /// Whether stored output varies with the request beyond the keys.
    fn is_contextual(&self) -> bool;
}

// == Deferred Block Cache ==
pub struct DeferredBlockCache {
    urls: Arc<dyn UrlGenerator>,
    mode: LoadMode,
    ttl: u64,
}

impl DeferredBlockCache {
    pub fn new(urls: Arc<dyn UrlGenerator>, mode: LoadMode) -> Self {
        Self {
            urls,
            mode,
            ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the TTL given to elements built by `get`.
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }
}

impl CacheAdapter for DeferredBlockCache {
    /// Always true: a placeholder can be produced for any key.
    fn has(&self, _keys: &CacheKeys) -> bool {
        true
    }

    fn get(&self, keys: &CacheKeys) -> Result<CacheElement> {
        keys.validate()?;

        // validate() guarantees the id is present.
        let block_id = keys.block_id().unwrap_or_default();
        let url = self.urls.generate(self.mode.route_name(), keys)?;
        debug!(block_id, mode = %self.mode, %url, "deferring block render");

        let markup = script::deferred_markup(self.mode, &dashify(block_id), &url);
        Ok(CacheElement::new(
            keys.clone(),
            BlockResponse::new(markup),
            self.ttl,
            Vec::new(),
        ))
    }

    fn set(
        &self,
        keys: &CacheKeys,
        data: CachePayload,
        ttl: Option<u64>,
        contextual_keys: Vec<String>,
    ) -> Result<CacheElement> {
        keys.validate()?;

        Ok(CacheElement::new(
            keys.clone(),
            data,
            ttl.unwrap_or(DEFAULT_TTL),
            contextual_keys,
        ))
    }

    fn flush(&self, _keys: &CacheKeys) -> bool {
        true
    }

    fn flush_all(&self) -> bool {
        true
    }

    fn is_contextual(&self) -> bool {
        false
    }
}
