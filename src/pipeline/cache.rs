//! Byte-bounded LRU response cache keyed by request identity.

// std
use std::num::NonZeroUsize;
// crates.io
use lru::LruCache;
// self
use crate::{_prelude::*, pipeline::HttpMethod};

/// Default upper bound on cached body bytes (10 MiB).
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;
/// Default upper bound on cached entries.
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Identity of a cached response.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute URL including the query string.
	pub url: String,
	/// `Accept` header sent with the request.
	pub accept: Option<String>,
}

/// Stored success response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedResponse {
	/// HTTP status of the original response.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}

#[derive(Debug)]
struct CacheState {
	entries: LruCache<CacheKey, CachedResponse>,
	bytes: usize,
}

/// In-memory response cache shared by every request executed through one pipeline.
///
/// Entries are evicted least-recently-used first, both when the entry cap is reached and
/// when the total body size would exceed the byte budget.
#[derive(Debug)]
pub struct ResponseCache {
	state: Mutex<CacheState>,
	max_bytes: usize,
}
impl ResponseCache {
	/// Creates a cache bounded by `max_entries` and `max_bytes`.
	pub fn new(max_entries: NonZeroUsize, max_bytes: usize) -> Self {
		Self { state: Mutex::new(CacheState { entries: LruCache::new(max_entries), bytes: 0 }), max_bytes }
	}

	/// Returns the cached response for `key`, marking it most recently used.
	pub fn get(&self, key: &CacheKey) -> Option<CachedResponse> {
		self.state.lock().entries.get(key).cloned()
	}

	/// Stores `response`, evicting older entries as needed. Returns `false` when the body
	/// alone exceeds the byte budget and nothing was stored.
	pub fn insert(&self, key: CacheKey, response: CachedResponse) -> bool {
		let size = response.body.len();

		if size > self.max_bytes {
			tracing::debug!(url = %key.url, size, "Response too large to cache.");

			return false;
		}

		let mut state = self.state.lock();

		if let Some(previous) = state.entries.pop(&key) {
			state.bytes -= previous.body.len();
		}

		while state.bytes + size > self.max_bytes {
			match state.entries.pop_lru() {
				Some((_, evicted)) => state.bytes -= evicted.body.len(),
				None => break,
			}
		}

		if let Some((_, evicted)) = state.entries.push(key, response) {
			state.bytes -= evicted.body.len();
		}

		state.bytes += size;

		true
	}

	/// Removes the entry for `key`, returning it if present.
	pub fn remove(&self, key: &CacheKey) -> Option<CachedResponse> {
		let mut state = self.state.lock();
		let removed = state.entries.pop(key)?;

		state.bytes -= removed.body.len();

		Some(removed)
	}

	/// Drops every entry.
	pub fn clear(&self) {
		let mut state = self.state.lock();

		state.entries.clear();
		state.bytes = 0;
	}

	/// Number of cached entries.
	pub fn len(&self) -> usize {
		self.state.lock().entries.len()
	}

	/// Returns `true` when nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Sum of cached body sizes in bytes.
	pub fn total_bytes(&self) -> usize {
		self.state.lock().bytes
	}
}
impl Default for ResponseCache {
	fn default() -> Self {
		Self::new(
			NonZeroUsize::new(DEFAULT_MAX_ENTRIES).unwrap_or(NonZeroUsize::MIN),
			DEFAULT_MAX_BYTES,
		)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn key(path: &str) -> CacheKey {
		CacheKey {
			method: HttpMethod::Get,
			url: format!("https://api.example.com/v1/{path}"),
			accept: Some("application/json".into()),
		}
	}

	fn response(len: usize) -> CachedResponse {
		CachedResponse { status: 200, body: vec![b'x'; len] }
	}

	fn cache(entries: usize, bytes: usize) -> ResponseCache {
		ResponseCache::new(NonZeroUsize::new(entries).expect("Entry cap should be non-zero."), bytes)
	}

	#[test]
	fn insert_then_get_returns_body() {
		let cache = cache(4, 1024);

		assert!(cache.insert(key("me"), response(10)));
		assert_eq!(cache.get(&key("me")), Some(response(10)));
		assert_eq!(cache.total_bytes(), 10);
		assert!(cache.get(&key("albums")).is_none());
	}

	#[test]
	fn byte_budget_evicts_least_recently_used() {
		let cache = cache(8, 25);

		cache.insert(key("a"), response(10));
		cache.insert(key("b"), response(10));
		// Touch `a` so `b` becomes the eviction candidate.
		cache.get(&key("a"));
		cache.insert(key("c"), response(10));

		assert!(cache.get(&key("b")).is_none());
		assert!(cache.get(&key("a")).is_some());
		assert!(cache.get(&key("c")).is_some());
		assert_eq!(cache.total_bytes(), 20);
	}

	#[test]
	fn entry_cap_keeps_byte_count_consistent() {
		let cache = cache(2, 1024);

		cache.insert(key("a"), response(3));
		cache.insert(key("b"), response(4));
		cache.insert(key("c"), response(5));

		assert_eq!(cache.len(), 2);
		assert_eq!(cache.total_bytes(), 9);
	}

	#[test]
	fn replacing_and_removing_adjusts_bytes() {
		let cache = cache(4, 1024);

		cache.insert(key("a"), response(3));
		cache.insert(key("a"), response(7));

		assert_eq!(cache.total_bytes(), 7);
		assert_eq!(cache.remove(&key("a")), Some(response(7)));
		assert!(cache.is_empty());
		assert_eq!(cache.total_bytes(), 0);
	}

	#[test]
	fn oversized_bodies_are_not_cached() {
		let cache = cache(4, 8);

		assert!(!cache.insert(key("big"), response(9)));
		assert!(cache.is_empty());
	}

	#[test]
	fn clear_empties_the_cache() {
		let cache = ResponseCache::default();

		cache.insert(key("a"), response(1));
		cache.clear();

		assert!(cache.is_empty());
		assert_eq!(cache.total_bytes(), 0);
	}
}
