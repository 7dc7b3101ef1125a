// SPDX-License-Identifier: MPL-2.0
//! Frame preloader for a single viewer session.
//!
//! Owns one cache entry per frame and decides which frames to fetch and when.
//!
//! # Design
//!
//! - **Eager entries**: every frame has an entry from session start; entries
//!   are never evicted, so `progress()` can only grow
//! - **Single flight**: a frame that is already loading hands out the same
//!   shared future instead of issuing a second fetch
//! - **Prioritized**: the first frames load before batching begins, so the
//!   opening frame and its neighbours are ready first
//! - **Cancellable**: `dispose()` aborts in-flight fetches and every
//!   completion re-checks the disposal flag before touching the cache
//!
//! # Usage
//!
//! ```ignore
//! let preloader = FramePreloader::new(source, fetcher, events);
//!
//! // Make sure the displayed frame and its neighbours are on their way
//! preloader.ensure_frame(index)?;
//! preloader.ensure_neighbors(index)?;
//!
//! // Stream the rest in the background
//! tokio::spawn(async move { preloader.preload_all(BatchSize::default()).await });
//! ```

use crate::application::port::{FetchError, FrameFetcher};
use crate::config::defaults::PRIORITY_FRAME_COUNT;
use crate::domain::viewer::{index_to_frame_number, wrap_index, BatchSize, FrameAsset, FrameState};
use crate::error::ViewerError;
use crate::media::frame_source::FrameSource;
use crate::viewer::events::{EventBus, ViewerEvent};
use futures_util::future::{self, BoxFuture, FutureExt, Shared};
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::AbortHandle;

/// Single-resolution outcome of a frame load, shareable between callers.
///
/// Resolves to `Ok(())` once the frame is Ready, `Err(FetchFailed)` if the
/// fetch failed, or `Err(Disposed)` if the session ended first.
pub type FrameLoad = Shared<BoxFuture<'static, Result<(), ViewerError>>>;

enum EntryState {
    NotRequested,
    Loading { load: FrameLoad, abort: AbortHandle },
    Ready(FrameAsset),
    Failed(String),
}

/// One cache entry per frame index, alive for the whole session.
struct FrameCacheEntry {
    index: usize,
    state: EntryState,
}

impl FrameCacheEntry {
    fn frame_state(&self) -> FrameState {
        match self.state {
            EntryState::NotRequested => FrameState::NotRequested,
            EntryState::Loading { .. } => FrameState::Loading,
            EntryState::Ready(_) => FrameState::Ready,
            EntryState::Failed(_) => FrameState::Failed,
        }
    }
}

struct CacheState {
    entries: Vec<FrameCacheEntry>,
    ready_count: usize,
    ready_bytes: usize,
    /// Index of the frame that became Ready most recently.
    last_ready: Option<usize>,
    stats: PreloadStats,
    disposed: bool,
}

impl CacheState {
    #[allow(clippy::cast_precision_loss)]
    fn progress(&self) -> f32 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.ready_count as f32 / self.entries.len() as f32
        }
    }
}

/// Counters describing what the preloader has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadStats {
    /// Fetches started, retries included.
    pub fetches_started: u64,

    /// Fetches that ended in failure.
    pub failures: u64,

    /// Fetches abandoned by `dispose()`.
    pub abandoned: u64,
}

/// Prioritized, single-flight frame cache for one viewer session.
///
/// Cloning yields another handle to the same cache. Methods that start
/// fetches must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct FramePreloader {
    cache: Arc<Mutex<CacheState>>,
    source: Arc<FrameSource>,
    fetcher: Arc<dyn FrameFetcher>,
    events: EventBus,
}

impl FramePreloader {
    /// Creates the cache with one `NotRequested` entry per frame of `source`.
    #[must_use]
    pub fn new(source: FrameSource, fetcher: Arc<dyn FrameFetcher>, events: EventBus) -> Self {
        let entries = (0..source.total_frames())
            .map(|index| FrameCacheEntry {
                index,
                state: EntryState::NotRequested,
            })
            .collect();

        Self {
            cache: Arc::new(Mutex::new(CacheState {
                entries,
                ready_count: 0,
                ready_bytes: 0,
                last_ready: None,
                stats: PreloadStats::default(),
                disposed: false,
            })),
            source: Arc::new(source),
            fetcher,
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes sure frame `index` is loaded or loading.
    ///
    /// `NotRequested` and `Failed` entries start a fetch; `Loading` entries
    /// return the in-flight load; `Ready` entries return an already-resolved
    /// load. Never issues two concurrent fetches for one frame.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidIndex`] for an out-of-range index and
    /// [`ViewerError::Disposed`] after `dispose()`.
    pub fn ensure_frame(&self, index: usize) -> Result<FrameLoad, ViewerError> {
        let mut cache = self.lock();
        if cache.disposed {
            return Err(ViewerError::Disposed);
        }
        let total = cache.entries.len();
        let entry = cache
            .entries
            .get(index)
            .ok_or(ViewerError::InvalidIndex { index, total })?;

        match &entry.state {
            EntryState::Ready(_) => return Ok(resolved(Ok(()))),
            EntryState::Loading { load, .. } => return Ok(load.clone()),
            EntryState::NotRequested | EntryState::Failed(_) => {}
        }

        let url = self
            .source
            .url_for(index)
            .ok_or(ViewerError::InvalidIndex { index, total })?;
        Ok(self.start_fetch(&mut cache, index, &url))
    }

    /// Ensures both wraparound neighbours of `index`, so a one-step drag in
    /// either direction never waits on the network.
    ///
    /// # Errors
    ///
    /// Same as [`ensure_frame`](Self::ensure_frame).
    pub fn ensure_neighbors(&self, index: usize) -> Result<(), ViewerError> {
        let total = self.total_frames();
        if index >= total {
            return Err(ViewerError::InvalidIndex { index, total });
        }
        self.ensure_frame(wrap_index(index, -1, total))?;
        self.ensure_frame(wrap_index(index, 1, total))?;
        Ok(())
    }

    fn start_fetch(&self, cache: &mut CacheState, index: usize, url: &str) -> FrameLoad {
        let fetch = self.fetcher.fetch(url);
        let shared_cache = Arc::clone(&self.cache);
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            let result = fetch.await;
            complete_fetch(&shared_cache, &events, index, result)
        });
        let abort = handle.abort_handle();

        let load = async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => Err(ViewerError::Disposed),
                Err(e) => Err(ViewerError::FetchFailed {
                    index,
                    reason: e.to_string(),
                }),
            }
        }
        .boxed()
        .shared();

        log::debug!("Frame {} loading from {}", index + 1, url);
        cache.entries[index].state = EntryState::Loading {
            load: load.clone(),
            abort,
        };
        cache.stats.fetches_started += 1;
        load
    }

    /// Loads every frame: the first `min(3, total)` with top priority, then
    /// the rest in batches of `batch` with a cooperative yield in between.
    ///
    /// Resolves once every batch has settled. Failed frames do not stop the
    /// schedule and are not retried by it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] if the session ends mid-schedule.
    pub async fn preload_all(&self, batch: BatchSize) -> Result<(), ViewerError> {
        self.preload_until(batch, self.total_frames()).await
    }

    /// Loads only the first `batch` frames (never fewer than the priority
    /// frames), priority frames first.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] if the session ends mid-schedule.
    pub async fn preload_initial(&self, batch: BatchSize) -> Result<(), ViewerError> {
        let total = self.total_frames();
        let end = batch.value().max(PRIORITY_FRAME_COUNT).min(total);
        self.preload_until(batch, end).await
    }

    async fn preload_until(&self, batch: BatchSize, end: usize) -> Result<(), ViewerError> {
        let total = self.total_frames();
        let priority = PRIORITY_FRAME_COUNT.min(total);
        log::info!("Preloading {} of {} frames", end, total);

        self.load_batch(0..priority).await?;

        let mut start = priority;
        while start < end {
            tokio::task::yield_now().await;
            let stop = (start + batch.value()).min(end);
            self.load_batch(start..stop).await?;
            log::debug!("Batch loaded: frames {}-{}", start + 1, stop);
            start = stop;
        }
        Ok(())
    }

    async fn load_batch(&self, range: Range<usize>) -> Result<(), ViewerError> {
        let mut loads = Vec::with_capacity(range.len());
        for index in range {
            if self.state(index) == Some(FrameState::Failed) {
                continue;
            }
            loads.push(self.ensure_frame(index)?);
        }

        let results = future::join_all(loads).await;
        if results.contains(&Err(ViewerError::Disposed)) {
            return Err(ViewerError::Disposed);
        }
        Ok(())
    }

    /// Returns whether frame `index` can be displayed. Out of range is `false`.
    #[must_use]
    pub fn is_ready(&self, index: usize) -> bool {
        self.state(index) == Some(FrameState::Ready)
    }

    /// Returns the state of frame `index`, or `None` when out of range.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<FrameState> {
        self.lock().entries.get(index).map(FrameCacheEntry::frame_state)
    }

    /// Returns the display handle of a Ready frame.
    #[must_use]
    pub fn asset(&self, index: usize) -> Option<FrameAsset> {
        match &self.lock().entries.get(index)?.state {
            EntryState::Ready(asset) => Some(asset.clone()),
            _ => None,
        }
    }

    /// Returns the failure reason of a Failed frame.
    #[must_use]
    pub fn failure(&self, index: usize) -> Option<String> {
        match &self.lock().entries.get(index)?.state {
            EntryState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Fraction of frames that are Ready, in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.lock().progress()
    }

    /// Progress as a percentage, for loading indicators.
    #[must_use]
    pub fn progress_percent(&self) -> f32 {
        self.progress() * 100.0
    }

    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.lock().ready_count
    }

    #[must_use]
    pub fn is_all_loaded(&self) -> bool {
        let cache = self.lock();
        cache.ready_count == cache.entries.len()
    }

    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns whether every priority frame has finished loading (either way).
    #[must_use]
    pub fn priority_settled(&self) -> bool {
        let cache = self.lock();
        cache
            .entries
            .iter()
            .take(PRIORITY_FRAME_COUNT)
            .all(|entry| entry.frame_state().is_settled())
    }

    /// Index of the frame that most recently became Ready.
    #[must_use]
    pub fn latest_ready(&self) -> Option<usize> {
        self.lock().last_ready
    }

    /// Bytes held by decoded Ready frames.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.lock().ready_bytes
    }

    #[must_use]
    pub fn stats(&self) -> PreloadStats {
        self.lock().stats
    }

    /// Resolved URL of frame `index`.
    #[must_use]
    pub fn url_for(&self, index: usize) -> Option<String> {
        self.source.url_for(index)
    }

    /// Ends the session's cache: aborts in-flight fetches and freezes every
    /// entry. Returns how many fetches were abandoned.
    pub fn dispose(&self) -> usize {
        let mut cache = self.lock();
        if cache.disposed {
            return 0;
        }
        cache.disposed = true;

        let mut abandoned = 0;
        for entry in &cache.entries {
            if let EntryState::Loading { abort, .. } = &entry.state {
                log::debug!("Abandoning frame {}", entry.index + 1);
                abort.abort();
                abandoned += 1;
            }
        }
        cache.stats.abandoned += abandoned as u64;
        log::debug!("Preloader disposed, {} fetches abandoned", abandoned);
        abandoned
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }
}

impl std::fmt::Debug for FramePreloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.lock();
        f.debug_struct("FramePreloader")
            .field("total_frames", &cache.entries.len())
            .field("ready", &cache.ready_count)
            .field("memory_usage", &cache.ready_bytes)
            .field("disposed", &cache.disposed)
            .field("stats", &cache.stats)
            .finish()
    }
}

fn resolved(outcome: Result<(), ViewerError>) -> FrameLoad {
    future::ready(outcome).boxed().shared()
}

/// Applies a finished fetch to the cache, unless the session is gone.
fn complete_fetch(
    cache: &Mutex<CacheState>,
    events: &EventBus,
    index: usize,
    result: Result<FrameAsset, FetchError>,
) -> Result<(), ViewerError> {
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if cache.disposed {
        log::debug!("Discarding frame {} completion after dispose", index + 1);
        return Err(ViewerError::Disposed);
    }

    let frame = index_to_frame_number(index);
    match result {
        Ok(asset) => {
            let size = asset.as_bitmap().map_or(0, |image| image.size_bytes());
            cache.entries[index].state = EntryState::Ready(asset);
            cache.ready_count += 1;
            cache.ready_bytes += size;
            cache.last_ready = Some(index);
            let progress = cache.progress();
            events.emit(ViewerEvent::FrameLoaded { frame, progress });
            Ok(())
        }
        Err(err) => {
            let reason = err.to_string();
            log::warn!("Frame {} failed to load: {}", frame, reason);
            cache.entries[index].state = EntryState::Failed(reason.clone());
            cache.stats.failures += 1;
            events.emit(ViewerEvent::FrameFailed {
                frame,
                reason: reason.clone(),
            });
            Err(ViewerError::FetchFailed { index, reason })
        }
    }
}
