/*!
 * Transcript caching.
 *
 * Memoizes successful transcript fetches per video id in a bounded LRU map so
 * repeated requests for the same video skip the upstream source. The lock is
 * released while the source is queried, so concurrent misses for one id may
 * fetch twice; both results are identical and the last insert wins.
 */

use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::TranscriptError;

use super::{Transcript, TranscriptSource};

/// Hit and miss counters of a transcript cache
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    /// Lookups answered from memory
    pub hits: usize,

    /// Lookups that went to the source
    pub misses: usize,

    /// hits / (hits + misses), or 0.0 before the first lookup
    pub hit_rate: f64,
}

/// Bounded LRU cache in front of a transcript source
pub struct TranscriptCache {
    /// Upstream source consulted on a miss
    source: Arc<dyn TranscriptSource>,

    /// Cached transcripts by video id
    entries: Mutex<LruCache<String, Arc<Transcript>>>,

    /// Cache hit counter
    hits: AtomicUsize,

    /// Cache miss counter
    misses: AtomicUsize,
}

impl std::fmt::Debug for TranscriptCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptCache")
            .field("source", &self.source)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl TranscriptCache {
    /// Create a cache holding at most `capacity` transcripts (minimum one)
    pub fn new(source: Arc<dyn TranscriptSource>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            source,
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Transcript for `video_id`, fetched from the source on a miss
    ///
    /// Failed fetches are returned as-is and leave the cache untouched.
    pub async fn get(&self, video_id: &str) -> Result<Arc<Transcript>, TranscriptError> {
        let cached = self.entries.lock().get(video_id).cloned();
        if let Some(cached) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Transcript cache hit for {}", video_id);
            return Ok(cached);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Transcript cache miss for {}", video_id);

        let transcript = Arc::new(self.source.fetch(video_id).await?);
        self.entries
            .lock()
            .put(video_id.to_string(), Arc::clone(&transcript));

        Ok(transcript)
    }

    /// Whether `video_id` is cached, without touching recency
    pub fn contains(&self, video_id: &str) -> bool {
        self.entries.lock().contains(video_id)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats { hits, misses, hit_rate }
    }

    /// Drop all entries and reset the counters
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Transcript cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}
