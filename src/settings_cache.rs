//! Time-expiring cache for site settings.
//!
//! The cache is an ordinary value owned by whoever needs it (usually next to
//! a [`crate::client::BlogClient`]), so tests can create, expire and reset it
//! freely. Callers pass the current [`Instant`] explicitly.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::types::Settings;

/// How long fetched settings stay fresh.
pub const DEFAULT_SETTINGS_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    settings: Settings,
    stored_at: Instant,
}

/// Single-slot settings cache with a fixed time-to-live.
#[derive(Debug)]
pub struct SettingsCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SETTINGS_TTL)
    }
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached settings, if present and still fresh at `now`.
    pub fn get(&self, now: Instant) -> Option<Settings> {
        let guard = self.entry.read().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .filter(|entry| !self.entry_expired(entry, now))
            .map(|entry| entry.settings.clone())
    }

    pub fn set(&self, settings: Settings, now: Instant) {
        let mut guard = self.entry.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(CacheEntry {
            settings,
            stored_at: now,
        });
    }

    pub fn clear(&self) {
        let mut guard = self.entry.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// `true` when nothing is cached or the entry is older than the TTL.
    pub fn is_expired(&self, now: Instant) -> bool {
        let guard = self.entry.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(entry) => self.entry_expired(entry, now),
            None => true,
        }
    }

    fn entry_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        [("site_name", "Inkpost")].into_iter().collect()
    }

    #[test]
    fn starts_empty_and_expired() {
        let cache = SettingsCache::new();
        let now = Instant::now();
        assert!(cache.is_expired(now));
        assert_eq!(cache.get(now), None);
        assert_eq!(cache.ttl(), DEFAULT_SETTINGS_TTL);
    }

    #[test]
    fn fresh_until_ttl_elapses() {
        let cache = SettingsCache::with_ttl(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.set(settings(), t0);

        let almost = t0 + Duration::from_secs(59);
        assert!(!cache.is_expired(almost));
        assert_eq!(cache.get(almost), Some(settings()));

        let later = t0 + Duration::from_secs(60);
        assert!(cache.is_expired(later));
        assert_eq!(cache.get(later), None);
    }

    #[test]
    fn clear_resets() {
        let cache = SettingsCache::new();
        let now = Instant::now();
        cache.set(settings(), now);
        cache.clear();
        assert!(cache.is_expired(now));
        assert_eq!(cache.get(now), None);
    }

    #[test]
    fn concurrent_readers() {
        let cache = std::sync::Arc::new(SettingsCache::new());
        let now = Instant::now();
        cache.set(settings(), now);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get(now))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Some(settings()));
        }
    }
}
