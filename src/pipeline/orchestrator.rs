use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    assets::fetch::ArtworkFetcher,
    cache::store::{CacheKey, CacheStore},
    config::ThumbnailConfig,
    foundation::error::{ThumbError, ThumbResult},
    model::track::{RenderRequest, Track},
    render::{backend::RenderBackend, compositor::Compositor},
};

/// Where a render is (or was when it failed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    CheckCache,
    Fetching,
    Composing,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckCache => "check_cache",
            Self::Fetching => "fetching",
            Self::Composing => "composing",
            Self::Done => "done",
        }
    }
}

/// Cache-first thumbnail generation with a fixed fallback image.
///
/// `generate` always yields a path: the cached render for the track, or the configured fallback
/// when anything along the way fails. Concurrent calls for the same track share one render.
pub struct ThumbnailPipeline<F, C, R = Compositor> {
    config: ThumbnailConfig,
    fetcher: F,
    cache: Arc<C>,
    backend: Arc<R>,
    in_flight: InFlight,
}

impl<F, C> ThumbnailPipeline<F, C, Compositor>
where
    F: ArtworkFetcher,
    C: CacheStore,
{
    /// Build a pipeline rendering with the built-in [`Compositor`].
    pub fn new(config: ThumbnailConfig, fetcher: F, cache: C) -> ThumbResult<Self> {
        let compositor = Compositor::new(&config)?;
        Ok(Self::with_backend(config, fetcher, cache, compositor))
    }
}

impl<F, C, R> ThumbnailPipeline<F, C, R>
where
    F: ArtworkFetcher,
    C: CacheStore,
    R: RenderBackend,
{
    pub fn with_backend(config: ThumbnailConfig, fetcher: F, cache: C, backend: R) -> Self {
        Self {
            config,
            fetcher,
            cache: Arc::new(cache),
            backend: Arc::new(backend),
            in_flight: InFlight::default(),
        }
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn key_for(&self, track: &Track) -> CacheKey {
        CacheKey::for_track(track, &self.config.layout_version)
    }

    /// Path of the rendered thumbnail for `track`, or the fallback image path on any failure.
    #[tracing::instrument(skip(self, track), fields(id = %track.id))]
    pub async fn generate(&self, track: &Track) -> PathBuf {
        let mut stage = Stage::CheckCache;
        match self.run(track, &mut stage).await {
            Ok(path) => path,
            Err(err) => {
                match &err {
                    ThumbError::Network(_) | ThumbError::Decode(_) => tracing::warn!(
                        stage = stage.as_str(),
                        kind = err.kind(),
                        error = %err,
                        "artwork unusable; serving fallback"
                    ),
                    _ => tracing::error!(
                        stage = stage.as_str(),
                        kind = err.kind(),
                        error = %err,
                        "thumbnail render failed; serving fallback"
                    ),
                }
                self.config.fallback_path.clone()
            }
        }
    }

    /// Like [`Self::generate`] but surfaces the failure instead of substituting the fallback.
    pub async fn try_generate(&self, track: &Track) -> ThumbResult<PathBuf> {
        let mut stage = Stage::CheckCache;
        self.run(track, &mut stage).await
    }

    async fn run(&self, track: &Track, stage: &mut Stage) -> ThumbResult<PathBuf> {
        *stage = Stage::CheckCache;
        let key = self.key_for(track);
        if self.cache.has(&key) {
            tracing::debug!(key = %key, "cache hit");
            *stage = Stage::Done;
            return Ok(self.cache.path(&key));
        }

        let _gate = self.in_flight.acquire(&key).await;
        if self.cache.has(&key) {
            tracing::debug!(key = %key, "rendered by a concurrent caller");
            *stage = Stage::Done;
            return Ok(self.cache.path(&key));
        }

        *stage = Stage::Fetching;
        let scratch_dir = self.config.scratch_dir();
        tokio::fs::create_dir_all(&scratch_dir).await?;
        let scratch = ScratchFile::new(scratch_dir.join(format!("{key}.img")));
        self.fetcher.fetch(&track.thumbnail, scratch.path()).await?;
        let artwork = tokio::fs::read(scratch.path()).await?;
        if artwork.is_empty() {
            return Err(ThumbError::network("fetched artwork is empty"));
        }

        *stage = Stage::Composing;
        let request = RenderRequest::from_track(track, self.config.canvas);
        let backend = Arc::clone(&self.backend);
        let cache = Arc::clone(&self.cache);
        let put_key = key.clone();
        let path = tokio::task::spawn_blocking(move || {
            let png = backend.render_png(&request, &artwork)?;
            cache.put(&put_key, &png)
        })
        .await
        .map_err(|e| ThumbError::Other(anyhow::anyhow!("render task aborted: {e}")))??;

        *stage = Stage::Done;
        tracing::debug!(key = %key, path = %path.display(), "thumbnail rendered");
        Ok(path)
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// Per-key render gate. Entries live only while some caller holds or awaits them.
#[derive(Default)]
struct InFlight {
    slots: Mutex<HashMap<CacheKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl InFlight {
    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Arc<tokio::sync::Mutex<()>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn acquire(&self, key: &CacheKey) -> InFlightGuard<'_> {
        let slot = Arc::clone(self.lock().entry(key.clone()).or_default());
        let held = slot.lock_owned().await;
        InFlightGuard {
            owner: self,
            key: key.clone(),
            held,
        }
    }
}

struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: CacheKey,
    held: tokio::sync::OwnedMutexGuard<()>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut slots = self.owner.lock();
        // The map and this guard are the only owners: nobody is waiting.
        if Arc::strong_count(tokio::sync::OwnedMutexGuard::mutex(&self.held)) == 2 {
            slots.remove(&self.key);
        }
    }
}

/// Downloaded artwork for one render; removed when the render ends, however it ends.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Removes the scratch file and the fetcher's in-progress `.part` sibling.
impl Drop for ScratchFile {
    fn drop(&mut self) {
        for path in [crate::assets::fetch::part_path(&self.path), self.path.clone()] {
            if let Err(e) = std::fs::remove_file(&path)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(path = %path.display(), error = %e, "could not remove scratch file");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/orchestrator.rs"]
mod tests;
