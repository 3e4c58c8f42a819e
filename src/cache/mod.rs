//! Cache Module
//!
//! Cache-key contract, deferred-load scripts, the cache gateway and the
//! callback that completes a deferred load.

mod callback;
mod element;
mod gateway;
mod keys;
pub mod script;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use callback::CallbackHandler;
pub use element::{CacheElement, CachePayload};
pub use gateway::{CacheAdapter, DeferredBlockCache};
pub use keys::{CacheKeys, BLOCK_ID_KEY, LOCALE_KEY, REQUIRED_KEYS, UPDATED_AT_KEY};
pub use script::LoadMode;

// == Public Constants ==
/// Default lifetime in seconds of elements built by the gateway
pub const DEFAULT_TTL: u64 = 86_400;
