//! Route URL Generator
//!
//! Maps route names to paths under a public base URL and appends the cache
//! keys as query parameters.

use std::collections::HashMap;

use url::Url;

use super::UrlGenerator;
use crate::cache::{CacheKeys, LoadMode};
use crate::error::{BlockCacheError, Result};

// == Route URL Generator ==
#[derive(Debug, Clone)]
pub struct RouteUrlGenerator {
    base: Url,
    routes: HashMap<String, String>,
}

impl RouteUrlGenerator {
    /// Creates a generator with no routes. Route paths resolve below the
    /// base URL's path, so `https://host/app` serves `https://host/app/_block/...`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| BlockCacheError::Internal(format!("invalid base url `{base_url}`: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            routes: HashMap::new(),
        })
    }

    /// Creates a generator knowing both deferred-load callback routes.
    pub fn for_callbacks(base_url: &str) -> Result<Self> {
        let mut generator = Self::new(base_url)?;
        for mode in [LoadMode::Sync, LoadMode::Async] {
            generator = generator.with_route(mode.route_name(), mode.route_path());
        }
        Ok(generator)
    }

    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.routes.insert(name.into(), path.into());
        self
    }
}

impl UrlGenerator for RouteUrlGenerator {
    fn generate(&self, route: &str, keys: &CacheKeys) -> Result<String> {
        let path = self
            .routes
            .get(route)
            .ok_or_else(|| BlockCacheError::UnknownRoute(route.to_string()))?;

        let mut url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| BlockCacheError::Internal(format!("cannot join `{path}`: {e}")))?;

        if !keys.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in keys.iter() {
                pairs.append_pair(name, value);
            }
        }

        Ok(url.into())
    }
}
