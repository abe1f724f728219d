//! Lookup result caching with TTL support.
//!
//! This crate memoizes reverse image lookups by media fingerprint so the same
//! image is never sent to the lookup service twice within the retention
//! window. "Nothing found" outcomes are cached as well.
//!
//! The cache is volatile by design: it lives for the duration of the process
//! and is never persisted.

#![warn(missing_docs)]

mod cache;
mod fingerprint;

pub use cache::{CacheEntry, CacheLookup, LookupCache, LookupCacheConfig, LookupCacheConfigBuilder};
pub use fingerprint::Fingerprint;
