//! Size/age upkeep for DashMap-backed caches.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub trait CacheEntry {
    fn created_at(&self) -> Instant;
}

/// Drop entries older than `max_age`, then evict oldest-first until at most
/// `max_entries` remain.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize, max_age: Duration)
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    let now = Instant::now();
    let mut entries: Vec<(K, Instant)> = cache
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().created_at()))
        .collect();

    for (key, created_at) in &entries {
        if now.duration_since(*created_at) > max_age {
            cache.remove(key);
        }
    }

    if cache.len() <= max_entries {
        return;
    }

    entries.sort_by_key(|(_, created_at)| *created_at);
    for (key, _) in entries {
        if cache.len() <= max_entries {
            break;
        }
        cache.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry(Instant);

    impl CacheEntry for Entry {
        fn created_at(&self) -> Instant {
            self.0
        }
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let cache: DashMap<u32, Entry> = DashMap::new();
        let base = Instant::now();
        for i in 0..5u32 {
            cache.insert(i, Entry(base + Duration::from_secs(i as u64)));
        }

        prune_cache(&cache, 2, Duration::from_secs(3600));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key(&3));
        assert!(cache.contains_key(&4));
    }

    #[test]
    fn drops_expired_entries() {
        let cache: DashMap<u32, Entry> = DashMap::new();
        cache.insert(1, Entry(Instant::now() - Duration::from_secs(120)));
        cache.insert(2, Entry(Instant::now()));

        prune_cache(&cache, 10, Duration::from_secs(60));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key(&2));
    }
}
