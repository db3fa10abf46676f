//! Bounded cache of geocoder outcomes, optionally persisted as JSON.
//!
//! Keys are the geocoder language plus the normalized location string.
//! Entries hold the raw trailing address segment, not a validated country,
//! so the resolver re-applies its current validation on every hit.
//! Entries never expire; the oldest is evicted when full.

use super::reference::normalize;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Debug)]
struct CacheEntry {
    /// `None` records a location the geocoder could not resolve.
    segment: Option<String>,
    timestamp: i64,
}

/// What the cache knows about a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheHit {
    /// Trailing address segment as the geocoder returned it.
    Segment(String),
    Unresolved,
}

pub struct ResolutionCache {
    path: Option<PathBuf>,
    capacity: usize,
    entries: HashMap<String, CacheEntry>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
    autosave: bool,
    dirty: bool,
}

fn key(language: &str, location: &str) -> String {
    format!("{}:{}", language.trim().to_lowercase(), normalize(location))
}

impl ResolutionCache {
    /// In-memory cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: None,
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
            autosave: true,
            dirty: false,
        }
    }

    /// Cache backed by `path`. A missing or unreadable file starts empty.
    pub fn load_from(path: PathBuf, capacity: usize) -> Self {
        let mut entries = Self::read_file(&path).unwrap_or_default();

        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort_by_key(|k| (entries[k].timestamp, k.clone()));
        let excess = keys.len().saturating_sub(capacity);
        for k in keys.drain(..excess) {
            entries.remove(&k);
        }

        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded cache");
        Self {
            path: Some(path),
            capacity,
            entries,
            order: keys.into(),
            autosave: true,
            dirty: false,
        }
    }

    fn read_file(path: &Path) -> Option<HashMap<String, CacheEntry>> {
        let data = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&data) {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable cache: {}", e);
                None
            }
        }
    }

    pub fn get(&self, language: &str, location: &str) -> Option<CacheHit> {
        let entry = self.entries.get(&key(language, location))?;
        Some(match &entry.segment {
            Some(segment) => CacheHit::Segment(segment.clone()),
            None => CacheHit::Unresolved,
        })
    }

    /// Record a geocoder outcome; `None` means the geocoder found nothing.
    pub fn put(&mut self, language: &str, location: &str, segment: Option<&str>) {
        if self.capacity == 0 {
            return;
        }

        let key = key(language, location);
        let entry = CacheEntry {
            segment: segment.map(str::to_string),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        if self.entries.insert(key.clone(), entry).is_none() {
            self.order.push_back(key);
            while self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }

        self.dirty = true;
        if self.autosave {
            self.flush();
        }
    }

    /// Toggle writing to disk on every `put`. Returns the previous setting.
    /// With autosave off, call [`flush`](Self::flush) when done.
    pub fn set_autosave(&mut self, autosave: bool) -> bool {
        std::mem::replace(&mut self.autosave, autosave)
    }

    /// Write pending changes. The file is replaced atomically.
    pub fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        let Some(path) = &self.path else {
            self.dirty = false;
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("cannot serialize cache: {}", e);
                return;
            }
        };

        let tmp = path.with_extension("json.tmp");
        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path));
        match written {
            Ok(()) => self.dirty = false,
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot write cache: {}", e);
                let _ = fs::remove_file(&tmp);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_get_normalized() {
        let mut cache = ResolutionCache::new(8);
        cache.put("en", "Berlin", Some("Deutschland"));

        assert_eq!(
            cache.get("EN", "  BERLIN "),
            Some(CacheHit::Segment("Deutschland".into()))
        );
    }

    #[test]
    fn test_language_is_part_of_key() {
        let mut cache = ResolutionCache::new(8);
        cache.put("de", "Munich", Some("Deutschland"));
        assert!(cache.get("en", "Munich").is_none());
        assert!(cache.get("de", "Munich").is_some());
    }

    #[test]
    fn test_negative_entry() {
        let mut cache = ResolutionCache::new(8);
        cache.put("en", "xyzzy123", None);
        assert_eq!(cache.get("en", "xyzzy123"), Some(CacheHit::Unresolved));
        assert!(cache.get("en", "other").is_none());
    }

    #[test]
    fn test_evicts_oldest() {
        let mut cache = ResolutionCache::new(2);
        cache.put("en", "a", None);
        cache.put("en", "b", None);
        cache.put("en", "c", None);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("en", "a").is_none());
        assert!(cache.get("en", "b").is_some());
        assert!(cache.get("en", "c").is_some());
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let mut cache = ResolutionCache::new(2);
        cache.put("en", "a", None);
        cache.put("en", "a", Some("Germany"));
        cache.put("en", "b", None);
        assert_eq!(cache.len(), 2);
        assert!(matches!(cache.get("en", "a"), Some(CacheHit::Segment(_))));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = ResolutionCache::new(0);
        cache.put("en", "a", None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        {
            let mut cache = ResolutionCache::load_from(path.clone(), 8);
            cache.put("en", "Berlin", Some("Germany"));
            cache.put("en", "nowhere", None);
        }

        let cache = ResolutionCache::load_from(path, 8);
        assert_eq!(cache.len(), 2);
        assert!(matches!(cache.get("en", "berlin"), Some(CacheHit::Segment(_))));
        assert_eq!(cache.get("en", "nowhere"), Some(CacheHit::Unresolved));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let mut cache = ResolutionCache::load_from(path.clone(), 8);
        cache.put("en", "Berlin", Some("Germany"));

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_deferred_save_writes_on_flush() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let mut cache = ResolutionCache::load_from(path.clone(), 8);

        assert!(cache.set_autosave(false));
        cache.put("en", "Berlin", Some("Germany"));
        cache.put("en", "Lyon", Some("France"));
        assert!(!path.exists());

        cache.flush();
        assert_eq!(ResolutionCache::load_from(path, 8).len(), 2);
    }

    #[test]
    fn test_load_trims_to_capacity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let json = r#"{
            "en:old": { "segment": "France", "timestamp": 1 },
            "en:mid": { "segment": null, "timestamp": 2 },
            "en:new": { "segment": "Japan", "timestamp": 3 }
        }"#;
        fs::write(&path, json).unwrap();

        let cache = ResolutionCache::load_from(path, 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("en", "old").is_none());
        assert!(cache.get("en", "new").is_some());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "not json").unwrap();
        assert!(ResolutionCache::load_from(path, 8).is_empty());
    }
}
