// SPDX-License-Identifier: MPL-2.0
//! Viewer session state machine.
//!
//! The engine owns the current frame and reconciles the three things that
//! want to move it: external requests (a slider), drag gestures, and the
//! auto-rotate timer. Every change goes through one choke point that
//! updates the frame, asks the preloader for the frame and its neighbours,
//! and emits a `FrameChanged` event.
//!
//! All operations are synchronous and must be called from within a Tokio
//! runtime (frame fetches and the auto-rotate timer are spawned tasks).

use crate::application::port::FrameFetcher;
use crate::config::defaults::PRIORITY_FRAME_COUNT;
use crate::domain::viewer::{
    frame_number_to_index, index_to_frame_number, wrap_index, AutoRotateInterval, FrameAsset,
};
use crate::error::ViewerError;
use crate::media::frame_source::FrameSource;
use crate::media::preloader::FramePreloader;
use crate::viewer::events::{EventBus, ViewerEvent};
use crate::viewer::gesture::GestureTracker;
use crate::viewer::settings::{InputKind, ViewerSettings};
use futures_util::future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Lifecycle state of a viewer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// The priority frames have not all finished loading yet.
    Loading,
    /// Interactive.
    Ready,
    /// Terminal; every further operation fails.
    Disposed,
}

struct Session {
    total: usize,
    current: usize,
    is_dragging: bool,
    /// Most recent Ready frame that was current before a frame change.
    last_good: Option<usize>,
    gesture: GestureTracker,
    auto_rotate: Option<JoinHandle<()>>,
    preload_task: Option<JoinHandle<()>>,
    disposed: bool,
}

struct EngineCore {
    session: Mutex<Session>,
    preloader: FramePreloader,
    events: EventBus,
    settings: ViewerSettings,
}

impl EngineCore {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn live(&self) -> Result<MutexGuard<'_, Session>, ViewerError> {
        let session = self.lock();
        if session.disposed {
            log::warn!("Operation rejected: viewer session is disposed");
            return Err(ViewerError::Disposed);
        }
        Ok(session)
    }

    /// The only writer of `current`.
    fn apply_frame_change(&self, session: &mut Session, index: usize) -> Result<u32, ViewerError> {
        if self.preloader.is_ready(session.current) {
            session.last_good = Some(session.current);
        }
        session.current = index;

        self.preloader.ensure_frame(index)?;
        self.preloader.ensure_neighbors(index)?;

        let frame = index_to_frame_number(index);
        self.events.emit(ViewerEvent::FrameChanged { frame });
        Ok(frame)
    }

    fn step(&self, session: &mut Session, step: i64) -> Result<u32, ViewerError> {
        let index = wrap_index(session.current, step, session.total);
        self.apply_frame_change(session, index)
    }

    fn stop_auto_rotate(&self, session: &mut Session) {
        if let Some(timer) = session.auto_rotate.take() {
            timer.abort();
            self.events.emit(ViewerEvent::AutoRotateChanged { active: false });
            log::debug!("Auto-rotate stopped");
        }
    }

    fn auto_rotate_tick(&self) -> Result<u32, ViewerError> {
        let mut session = self.lock();
        if session.disposed {
            return Err(ViewerError::Disposed);
        }
        self.step(&mut session, 1)
    }
}

/// One mounted product viewer.
///
/// Dropping the engine disposes the session.
pub struct ViewerEngine {
    core: Arc<EngineCore>,
}

impl ViewerEngine {
    /// Creates a session over `source`, starting at frame 1. Nothing is
    /// fetched until a frame changes or [`start_preload`](Self::start_preload)
    /// runs.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::NoFrames`] if `source` has no frames.
    pub fn new(
        source: FrameSource,
        fetcher: Arc<dyn FrameFetcher>,
        settings: ViewerSettings,
    ) -> Result<Self, ViewerError> {
        let total = source.total_frames();
        if total == 0 {
            return Err(ViewerError::NoFrames);
        }

        let events = EventBus::new();
        let preloader = FramePreloader::new(source, fetcher, events.clone());
        let session = Session {
            total,
            current: 0,
            is_dragging: false,
            last_good: None,
            gesture: GestureTracker::new(),
            auto_rotate: None,
            preload_task: None,
            disposed: false,
        };

        log::info!("Viewer session created with {} frames", total);
        Ok(Self {
            core: Arc::new(EngineCore {
                session: Mutex::new(session),
                preloader,
                events,
                settings,
            }),
        })
    }

    /// Creates a session and immediately starts background preloading.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::NoFrames`] if `source` has no frames.
    pub fn mount(
        source: FrameSource,
        fetcher: Arc<dyn FrameFetcher>,
        settings: ViewerSettings,
    ) -> Result<Self, ViewerError> {
        let engine = Self::new(source, fetcher, settings)?;
        engine.start_preload()?;
        Ok(engine)
    }

    /// Spawns the background preload schedule chosen by the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn start_preload(&self) -> Result<(), ViewerError> {
        let mut session = self.core.live()?;
        if let Some(previous) = session.preload_task.take() {
            previous.abort();
        }

        let preloader = self.core.preloader.clone();
        let batch = self.core.settings.preload_batch;
        let all = self.core.settings.preload_all;
        session.preload_task = Some(tokio::spawn(async move {
            let outcome = if all {
                preloader.preload_all(batch).await
            } else {
                preloader.preload_initial(batch).await
            };
            match outcome {
                Ok(()) => log::info!(
                    "Preload finished: {}/{} frames ready",
                    preloader.loaded_count(),
                    preloader.total_frames()
                ),
                Err(e) => log::debug!("Preload stopped: {}", e),
            }
        }));
        Ok(())
    }

    /// Resolves once every priority frame has settled (Ready or Failed).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] if the session ends first.
    pub async fn ready(&self) -> Result<(), ViewerError> {
        let loads = {
            let session = self.core.live()?;
            (0..PRIORITY_FRAME_COUNT.min(session.total))
                .map(|index| self.core.preloader.ensure_frame(index))
                .collect::<Result<Vec<_>, _>>()?
        };

        let results = future::join_all(loads).await;
        if results.contains(&Err(ViewerError::Disposed)) {
            return Err(ViewerError::Disposed);
        }
        log::info!("Viewer ready");
        Ok(())
    }

    // =========================================================================
    // Frame changes
    // =========================================================================

    /// Requests a 1-based frame from outside (e.g. a slider).
    ///
    /// Any integer is accepted and wrapped around the loop. Returns `false`
    /// when the request is suppressed by an active drag.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn set_external_frame(&self, frame: i64) -> Result<bool, ViewerError> {
        let mut session = self.core.live()?;
        if session.is_dragging {
            log::debug!("External frame {} ignored during drag", frame);
            return Ok(false);
        }
        let index = frame_number_to_index(frame, session.total);
        self.core.apply_frame_change(&mut session, index)?;
        Ok(true)
    }

    /// Moves by `step` frames, wrapping. Always honored, drag or not.
    ///
    /// Returns the new 1-based frame.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn on_gesture_step(&self, step: i64) -> Result<u32, ViewerError> {
        let mut session = self.core.live()?;
        self.core.step(&mut session, step)
    }

    /// Equivalent to `set_external_frame(1)` plus `stop_auto_rotate()`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn reset(&self) -> Result<(), ViewerError> {
        self.set_external_frame(1)?;
        self.stop_auto_rotate()
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Starts a drag at `start_x`: external requests are suppressed and
    /// auto-rotate stops.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn begin_gesture(&self, start_x: f32) -> Result<(), ViewerError> {
        let mut session = self.core.live()?;
        self.core.stop_auto_rotate(&mut session);
        session.is_dragging = true;
        session.gesture.begin(start_x);
        Ok(())
    }

    /// Feeds a pointer or touch position into the active drag and applies
    /// the resulting steps. Returns the number of steps applied.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn update_gesture(&self, x: f32, input: InputKind) -> Result<i32, ViewerError> {
        let mut session = self.core.live()?;
        let steps = session
            .gesture
            .update(x, self.core.settings.sensitivity(input));
        if steps != 0 {
            self.core.step(&mut session, i64::from(steps))?;
        }
        Ok(steps)
    }

    /// Ends the drag. Produces no frame change.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn end_gesture(&self) -> Result<(), ViewerError> {
        let mut session = self.core.live()?;
        session.gesture.end();
        session.is_dragging = false;
        Ok(())
    }

    // =========================================================================
    // Auto-rotate
    // =========================================================================

    /// Advances one frame every `interval` (the configured cadence when
    /// `None`). Restarting replaces the running timer. Ignored during a drag.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn start_auto_rotate(&self, interval: Option<AutoRotateInterval>) -> Result<(), ViewerError> {
        let mut session = self.core.live()?;
        if session.is_dragging {
            log::debug!("Auto-rotate not started during drag");
            return Ok(());
        }

        let period = interval
            .unwrap_or(self.core.settings.auto_rotate_interval)
            .as_duration();
        let core: Weak<EngineCore> = Arc::downgrade(&self.core);
        let timer = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(core) = core.upgrade() else {
                    break;
                };
                if core.auto_rotate_tick().is_err() {
                    break;
                }
            }
        });

        let was_active = match session.auto_rotate.replace(timer) {
            Some(previous) => {
                previous.abort();
                true
            }
            None => false,
        };
        if !was_active {
            self.core
                .events
                .emit(ViewerEvent::AutoRotateChanged { active: true });
        }
        log::debug!("Auto-rotate started ({} ms)", period.as_millis());
        Ok(())
    }

    /// Stops auto-rotate and clears its timer. No-op when not rotating.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn stop_auto_rotate(&self) -> Result<(), ViewerError> {
        let mut session = self.core.live()?;
        self.core.stop_auto_rotate(&mut session);
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the committed 1-based frame.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn current_frame(&self) -> Result<u32, ViewerError> {
        let session = self.core.live()?;
        Ok(index_to_frame_number(session.current))
    }

    /// Returns the 1-based frame to draw: the current frame if Ready, else
    /// the last Ready frame that was shown, else the frame that most
    /// recently finished loading, else `None` (placeholder).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn displayed_frame(&self) -> Result<Option<u32>, ViewerError> {
        let session = self.core.live()?;
        Ok(self.displayed_index(&session).map(index_to_frame_number))
    }

    /// Returns the asset of [`displayed_frame`](Self::displayed_frame).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn displayed_asset(&self) -> Result<Option<FrameAsset>, ViewerError> {
        let session = self.core.live()?;
        Ok(self
            .displayed_index(&session)
            .and_then(|index| self.core.preloader.asset(index)))
    }

    fn displayed_index(&self, session: &Session) -> Option<usize> {
        let preloader = &self.core.preloader;
        if preloader.is_ready(session.current) {
            return Some(session.current);
        }
        session
            .last_good
            .filter(|&index| preloader.is_ready(index))
            .or_else(|| preloader.latest_ready())
    }

    /// Counter label such as `"03 / 16"`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn frame_counter(&self) -> Result<String, ViewerError> {
        let session = self.core.live()?;
        Ok(format!(
            "{:02} / {:02}",
            index_to_frame_number(session.current),
            session.total
        ))
    }

    /// Slider position of the current frame in `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    #[allow(clippy::cast_precision_loss)]
    pub fn slider_fraction(&self) -> Result<f32, ViewerError> {
        let session = self.core.live()?;
        if session.total <= 1 {
            return Ok(0.0);
        }
        Ok(session.current as f32 / (session.total - 1) as f32)
    }

    /// Registers an event subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after `dispose()`.
    pub fn subscribe(&self) -> Result<UnboundedReceiver<ViewerEvent>, ViewerError> {
        let _session = self.core.live()?;
        Ok(self.core.events.subscribe())
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.core.lock().disposed {
            EngineState::Disposed
        } else if self.core.preloader.priority_settled() {
            EngineState::Ready
        } else {
            EngineState::Loading
        }
    }

    /// Fraction of frames loaded. Stays answerable after dispose.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.core.preloader.progress()
    }

    /// Whether the 1-based `frame` is Ready. Stays answerable after dispose.
    #[must_use]
    pub fn is_frame_ready(&self, frame: u32) -> bool {
        frame
            .checked_sub(1)
            .is_some_and(|index| self.core.preloader.is_ready(index as usize))
    }

    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.core.lock().total
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.core.lock().is_dragging
    }

    #[must_use]
    pub fn is_auto_rotating(&self) -> bool {
        self.core.lock().auto_rotate.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.core.settings
    }

    /// The session's frame cache, for read-only queries.
    #[must_use]
    pub fn preloader(&self) -> &FramePreloader {
        &self.core.preloader
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Ends the session: clears the auto-rotate timer, abandons in-flight
    /// loads and closes every event stream.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] if already disposed.
    pub fn dispose(&self) -> Result<(), ViewerError> {
        if self.shutdown() {
            Ok(())
        } else {
            Err(ViewerError::Disposed)
        }
    }

    fn shutdown(&self) -> bool {
        let mut session = self.core.lock();
        if session.disposed {
            return false;
        }
        session.disposed = true;

        if let Some(timer) = session.auto_rotate.take() {
            timer.abort();
        }
        if let Some(task) = session.preload_task.take() {
            task.abort();
        }
        session.gesture.end();
        session.is_dragging = false;

        let abandoned = self.core.preloader.dispose();
        self.core.events.close();
        log::info!("Viewer session disposed ({} loads abandoned)", abandoned);
        true
    }
}

impl Drop for ViewerEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ViewerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.core.lock();
        f.debug_struct("ViewerEngine")
            .field("total", &session.total)
            .field("current", &session.current)
            .field("is_dragging", &session.is_dragging)
            .field("auto_rotating", &session.auto_rotate.is_some())
            .field("disposed", &session.disposed)
            .finish_non_exhaustive()
    }
}
