//! Cache Key Module
//!
//! The flat key mapping that addresses a block's deferred render. The same
//! mapping is used for lookups and as the callback URL's parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::{BlockCacheError, Result};

pub const BLOCK_ID_KEY: &str = "block_id";
pub const UPDATED_AT_KEY: &str = "updated_at";
pub const LOCALE_KEY: &str = "locale";

/// Fields every key mapping must carry, in validation order.
pub const REQUIRED_KEYS: [&str; 2] = [BLOCK_ID_KEY, UPDATED_AT_KEY];

// == Cache Keys ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKeys(BTreeMap<String, String>);

impl CacheKeys {
    /// Keys with both required fields set.
    pub fn new(block_id: impl Into<String>, updated_at: impl Into<String>) -> Self {
        Self::default()
            .with(BLOCK_ID_KEY, block_id)
            .with(UPDATED_AT_KEY, updated_at)
    }

    /// Derives keys from a block: its id, its last modification as unix
    /// seconds and its locale when it has one. A block that was never
    /// updated yields keys without `updated_at`.
    pub fn for_block(block: &Block) -> Self {
        let mut keys = Self::default().with(BLOCK_ID_KEY, block.id());
        if let Some(updated_at) = block.updated_at() {
            keys.insert(UPDATED_AT_KEY, updated_at.timestamp().to_string());
        }
        if let Some(locale) = block.locale() {
            keys.insert(LOCALE_KEY, locale);
        }
        keys
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn block_id(&self) -> Option<&str> {
        self.get(BLOCK_ID_KEY)
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.get(UPDATED_AT_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // == Validate ==
    /// Fails on the first required field that is absent. Values are not
    /// inspected beyond presence.
    pub fn validate(&self) -> Result<()> {
        match REQUIRED_KEYS.iter().find(|key| !self.0.contains_key(**key)) {
            Some(missing) => Err(BlockCacheError::MissingKey(*missing)),
            None => Ok(()),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CacheKeys {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
