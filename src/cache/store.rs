use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::Context;

use crate::{
    foundation::{
        error::{ThumbError, ThumbResult},
        math::Fnv1a64,
    },
    model::track::Track,
};

/// Identity of a persisted thumbnail: `"{id}_{layout_version}"`.
///
/// Only `[A-Za-z0-9_-]` survive into the key; when anything had to be replaced a hash of the raw
/// parts is appended so distinct ids never collide on disk.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_track(track: &Track, layout_version: &str) -> Self {
        Self::new(&track.id, layout_version)
    }

    pub fn new(id: &str, layout_version: &str) -> Self {
        let (safe_id, id_changed) = sanitize(id);
        let (safe_version, version_changed) = sanitize(layout_version);
        let mut key = format!("{safe_id}_{safe_version}");
        if id_changed || version_changed {
            let mut h = Fnv1a64::new_default();
            h.write_bytes(id.as_bytes());
            h.write_u8(0);
            h.write_bytes(layout_version.as_bytes());
            key.push_str(&format!("-{:016x}", h.finish()));
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.0)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize(raw: &str) -> (String, bool) {
    let safe: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let changed = raw.is_empty() || safe != raw;
    (safe, changed)
}

/// Write-once store of rendered PNGs. No TTL, no eviction.
pub trait CacheStore: Send + Sync + 'static {
    fn has(&self, key: &CacheKey) -> bool;

    /// Where `key` lives (or would live). Pure.
    fn path(&self, key: &CacheKey) -> PathBuf;

    /// Persist `png` under `key` and return its path. An existing entry is kept as is.
    fn put(&self, key: &CacheKey, png: &[u8]) -> ThumbResult<PathBuf>;
}

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Cache directory of `<key>.png` files; file existence is the index.
#[derive(Clone, Debug)]
pub struct FsCacheStore {
    dir: PathBuf,
}

impl FsCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> ThumbResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create cache dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CacheStore for FsCacheStore {
    fn has(&self, key: &CacheKey) -> bool {
        self.path(key).is_file()
    }

    fn path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn put(&self, key: &CacheKey, png: &[u8]) -> ThumbResult<PathBuf> {
        let dest = self.path(key);
        if dest.is_file() {
            tracing::debug!(key = %key, "cache entry already present; keeping it");
            return Ok(dest);
        }
        if png.is_empty() {
            return Err(ThumbError::Other(anyhow::anyhow!(
                "refusing to cache an empty image for '{key}'"
            )));
        }

        let tmp = self.dir.join(format!(
            "{}.{}-{}.tmp",
            key.file_name(),
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let written = std::fs::write(&tmp, png)
            .with_context(|| format!("write '{}'", tmp.display()))
            .and_then(|()| {
                std::fs::rename(&tmp, &dest)
                    .with_context(|| format!("move '{}' into place", tmp.display()))
            });
        if let Err(err) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(err.into());
        }
        tracing::debug!(key = %key, path = %dest.display(), bytes = png.len(), "cached thumbnail");
        Ok(dest)
    }
}

/// In-memory store; paths are virtual under `root` and never touch the disk.
#[derive(Debug)]
pub struct MemoryCacheStore {
    root: PathBuf,
    entries: Mutex<HashMap<CacheKey, Vec<u8>>>,
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new("memory-cache")
    }
}

impl MemoryCacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Vec<u8>>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CacheStore for MemoryCacheStore {
    fn has(&self, key: &CacheKey) -> bool {
        self.lock().contains_key(key)
    }

    fn path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    fn put(&self, key: &CacheKey, png: &[u8]) -> ThumbResult<PathBuf> {
        self.lock()
            .entry(key.clone())
            .or_insert_with(|| png.to_vec());
        Ok(self.path(key))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/store.rs"]
mod tests;
