//! Cache Element Module
//!
//! Immutable value returned by the cache gateway for every lookup or store.

use axum::body::Bytes;
use chrono::{DateTime, Duration, Utc};

use crate::cache::CacheKeys;
use crate::render::BlockResponse;

// == Cache Payload ==
/// What a cache element carries.
#[derive(Debug, Clone, PartialEq)]
pub enum CachePayload {
    /// An HTTP-shaped response (headers and body)
    Response(BlockResponse),
    /// Rendered bytes with no response envelope
    Raw(Bytes),
}

impl CachePayload {
    /// Body text of the payload; raw bytes are decoded lossily.
    pub fn body(&self) -> String {
        match self {
            CachePayload::Response(response) => response.body().to_string(),
            CachePayload::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

impl From<BlockResponse> for CachePayload {
    fn from(response: BlockResponse) -> Self {
        CachePayload::Response(response)
    }
}

impl From<Bytes> for CachePayload {
    fn from(bytes: Bytes) -> Self {
        CachePayload::Raw(bytes)
    }
}

// == Cache Element ==
#[derive(Debug, Clone, PartialEq)]
pub struct CacheElement {
    keys: CacheKeys,
    payload: CachePayload,
    ttl: u64,
    contextual_keys: Vec<String>,
    created_at: DateTime<Utc>,
}

impl CacheElement {
    // == Constructor ==
    /// Creates an element stamped with the current time.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime in seconds
    /// * `contextual_keys` - Extra request dimensions the element varies on
    pub fn new(
        keys: CacheKeys,
        payload: impl Into<CachePayload>,
        ttl: u64,
        contextual_keys: Vec<String>,
    ) -> Self {
        Self {
            keys,
            payload: payload.into(),
            ttl,
            contextual_keys,
            created_at: Utc::now(),
        }
    }

    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    pub fn payload(&self) -> &CachePayload {
        &self.payload
    }

    pub fn into_payload(self) -> CachePayload {
        self.payload
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub fn contextual_keys(&self) -> &[String] {
        &self.contextual_keys
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // == Expiry ==
    /// Instant at which the element stops being valid. Saturates at the
    /// latest representable time for huge TTLs.
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.ttl)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// An element is expired once `now` reaches its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Remaining lifetime in seconds, zero once expired.
    pub fn ttl_remaining(&self) -> u64 {
        let remaining = self.expires_at() - Utc::now();
        u64::try_from(remaining.num_seconds()).unwrap_or(0)
    }
}
