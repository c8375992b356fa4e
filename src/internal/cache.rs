use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::models::VideoMetadata;

struct CacheEntry {
    metadata: VideoMetadata,
    expires_at: Instant,
}

/// In-memory TTL cache for resolved video metadata, keyed by video id.
///
/// oEmbed titles change rarely, so repeated playlist initializations within
/// the TTL skip the network entirely.
pub struct MetadataCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl MetadataCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get a cached entry if present and not yet expired.
    pub fn get(&self, id: &str) -> Option<VideoMetadata> {
        let entries = self.entries.read().ok()?;
        entries
            .get(id)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.metadata.clone())
    }

    pub fn set(&self, id: &str, metadata: VideoMetadata) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                id.to_string(),
                CacheEntry {
                    metadata,
                    expires_at: Instant::now() + self.ttl,
                },
            );
        }
    }

    /// Drop every cached entry, forcing the next lookups back to the network.
    #[allow(dead_code)]
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
