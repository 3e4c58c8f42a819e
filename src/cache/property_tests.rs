//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the key contract, the gateway and the scripts
//! over generated inputs.

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::block::dashify;
use crate::cache::{
    script, CacheAdapter, CacheKeys, CachePayload, DeferredBlockCache, LoadMode, BLOCK_ID_KEY,
    UPDATED_AT_KEY,
};
use crate::error::{BlockCacheError, Result};
use crate::render::{RouteUrlGenerator, UrlGenerator};

// == Test Doubles ==
/// Counts how often a URL was requested.
#[derive(Default)]
struct CountingUrls {
    calls: AtomicUsize,
}

impl UrlGenerator for CountingUrls {
    fn generate(&self, route: &str, _keys: &CacheKeys) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://example.org/{route}"))
    }
}

// == Strategies ==
/// Block identifiers shaped like store paths
fn block_id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_/.-]{1,64}"
}

fn any_mode() -> impl Strategy<Value = LoadMode> {
    prop_oneof![Just(LoadMode::Sync), Just(LoadMode::Async)]
}

/// Key mappings lacking at least one required field
fn incomplete_keys_strategy() -> impl Strategy<Value = CacheKeys> {
    (
        prop::option::of(block_id_strategy()),
        prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{0,8}", 0..4),
    )
        .prop_filter("extra keys must not supply required fields", |(_, extra)| {
            !extra.contains_key(BLOCK_ID_KEY) && !extra.contains_key(UPDATED_AT_KEY)
        })
        .prop_map(|(block_id, extra)| {
            let mut keys: CacheKeys = extra.into_iter().collect();
            if let Some(id) = block_id {
                keys.insert(BLOCK_ID_KEY, id);
            }
            keys
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Dashify output contains no separators and is a fixed point.
    #[test]
    fn prop_dashify_idempotent(src in ".{0,64}") {
        let once = dashify(&src);
        prop_assert!(!once.contains('/') && !once.contains('.'));
        prop_assert_eq!(dashify(&once), once.clone());
        prop_assert_eq!(once.chars().count(), src.chars().count());
    }

    // has() answers true without looking at the keys.
    #[test]
    fn prop_has_is_total(keys in incomplete_keys_strategy(), mode in any_mode()) {
        let urls = Arc::new(CountingUrls::default());
        let cache = DeferredBlockCache::new(urls.clone(), mode);

        prop_assert!(cache.has(&keys));
        prop_assert!(cache.has(&CacheKeys::new("a", "1")));
        prop_assert_eq!(urls.calls.load(Ordering::SeqCst), 0);
    }

    // Incomplete keys fail before any URL is generated.
    #[test]
    fn prop_incomplete_keys_have_no_side_effects(
        keys in incomplete_keys_strategy(),
        mode in any_mode()
    ) {
        let urls = Arc::new(CountingUrls::default());
        let cache = DeferredBlockCache::new(urls.clone(), mode);

        let got = cache.get(&keys);
        let set = cache.set(&keys, CachePayload::Raw(Default::default()), None, vec![]);

        prop_assert!(matches!(got, Err(BlockCacheError::MissingKey(_))));
        prop_assert!(matches!(set, Err(BlockCacheError::MissingKey(_))));
        prop_assert_eq!(urls.calls.load(Ordering::SeqCst), 0);
    }

    // The placeholder id appears exactly once and the script targets the
    // generated URL for the gateway's mode.
    #[test]
    fn prop_placeholder_addresses_generated_url(
        block_id in block_id_strategy(),
        updated_at in "[0-9]{1,10}",
        mode in any_mode()
    ) {
        let urls = Arc::new(RouteUrlGenerator::for_callbacks("https://example.org").unwrap());
        let cache = DeferredBlockCache::new(urls.clone(), mode);
        let keys = CacheKeys::new(block_id.clone(), updated_at);

        let body = cache.get(&keys).unwrap().payload().body();
        let expected_url = urls.generate(mode.route_name(), &keys).unwrap();
        let id_attr = format!("id=\"block-{}\"", dashify(&block_id));

        prop_assert_eq!(body.matches(&id_attr).count(), 1);
        prop_assert!(body.contains(&script::js_string(&expected_url)));
        prop_assert_eq!(body.contains("XMLHttpRequest"), mode == LoadMode::Sync);
    }

    // Inline payloads never close the surrounding script element.
    #[test]
    fn prop_inline_script_never_closes_script_tag(html in ".{0,128}") {
        let js = script::inline_replace_script("x", &html);
        prop_assert!(!js.to_ascii_lowercase().contains("</script"));
    }
}
