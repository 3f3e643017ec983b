//! AI Response Cache
//!
//! TTL cache for completion responses, keyed by a hash of the prompt,
//! model, and temperature. Repeating an identical request within the TTL
//! window skips the network round trip.

use std::time::Duration;

use mini_moka::sync::Cache;
use sha2::{Digest, Sha256};

/// Default number of cached responses
const DEFAULT_CAPACITY: u64 = 256;

/// TTL cache for completion responses
pub struct ResponseCache {
    cache: Cache<String, String>,
}

impl ResponseCache {
    /// Create a cache whose entries expire after `ttl_secs`
    pub fn new(ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(DEFAULT_CAPACITY)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self { cache }
    }

    /// Cache key for a request: sha256 of prompt, model, and temperature
    pub fn key(prompt: &str, model: &str, temperature: f32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        hasher.update(b"|");
        hasher.update(model.as_bytes());
        hasher.update(b"|");
        hasher.update(format!("{:.3}", temperature).as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Look up a cached response
    pub fn get(&self, key: &str) -> Option<String> {
        self.cache.get(&key.to_string())
    }

    /// Store a response
    pub fn put(&self, key: String, response: String) {
        self.cache.insert(key, response);
    }

    /// Drop all cached responses
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
