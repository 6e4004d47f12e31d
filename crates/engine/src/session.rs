use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::TrimConfig;
use crate::error::Result;
use crate::gesture::{DragOutcome, DragRejection, DragState, Handle, begin_drag, resolve_move};
use crate::label::format_duration_label;
use crate::mapper::{TimelineGeometry, TimelineMapper, compute_geometry};
use crate::observer::TrimObserver;
use crate::playback::{PlaybackControl, PlaybackStatus};

/// Last playback state observed from the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayheadState {
    pub position_ms: u64,
    pub is_playing: bool,
}

/// Serializable view of a session for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimSnapshot {
    pub start_ms: u64,
    pub end_ms: u64,
    pub start_px: f64,
    pub end_px: f64,
    pub playhead_px: f64,
    pub position_ms: u64,
    pub is_playing: bool,
    pub dragging: Option<Handle>,
}

/// One trim session: the selection, the drag gesture and playback sync.
///
/// The session drives the player through `P` and reports changes to `O`.
/// It is single threaded; hosts feed gestures and playback ticks one at a
/// time from their event loop. Dropping the session pauses the player and
/// reports a final `false` playing state.
///
/// # Example
/// ```
/// use trim_engine::{PlaybackControl, PlaybackStatus, Result, TrimConfig, TrimEvent, TrimSession};
///
/// #[derive(Default)]
/// struct Player {
///     position_ms: u64,
/// }
///
/// impl PlaybackControl for Player {
///     fn duration_ms(&self) -> Result<u64> { Ok(60_000) }
///     fn status(&self) -> PlaybackStatus {
///         PlaybackStatus { position_ms: self.position_ms, is_playing: false }
///     }
///     fn seek(&mut self, position_ms: u64) -> Result<()> {
///         self.position_ms = position_ms;
///         Ok(())
///     }
///     fn play(&mut self) -> Result<()> { Ok(()) }
///     fn pause(&mut self) -> Result<()> { Ok(()) }
///     fn set_volume(&mut self, _level: f64) -> Result<()> { Ok(()) }
/// }
///
/// let config = TrimConfig { viewer_width_px: 300.0, ..TrimConfig::default() };
/// let mut player = Player::default();
/// let mut events: Vec<TrimEvent> = Vec::new();
/// let mut session = TrimSession::new(&config, &mut player, &mut events).expect("session");
///
/// session.drag_start(290.0);
/// session.drag_update(-30.0);
/// session.drag_end();
/// assert_eq!(session.end_ms(), 54_000);
/// drop(session);
///
/// assert_eq!(player.position_ms, 54_000);
/// assert_eq!(events[0], TrimEvent::EndChanged { ms: 60_000 });
/// ```
#[derive(Debug)]
pub struct TrimSession<P, O>
where
    P: PlaybackControl,
    O: TrimObserver,
{
    mapper: TimelineMapper,
    playback: Option<P>,
    observer: O,
    start_px: f64,
    end_px: f64,
    start_ms: u64,
    end_ms: u64,
    playhead: PlayheadState,
    playhead_px: f64,
    drag: DragState,
    pause_pending: bool,
}

impl<P, O> TrimSession<P, O>
where
    P: PlaybackControl,
    O: TrimObserver,
{
    /// Starts a session over the player's video.
    ///
    /// Fails when the config or the viewer geometry is unusable, or when the
    /// player cannot report a duration. On success the observer has already
    /// received the initial end position.
    pub fn new(config: &TrimConfig, mut playback: P, mut observer: O) -> Result<Self> {
        config.validate()?;
        let geometry = compute_geometry(config.viewer_width_px, config.viewer_height_px)?;
        let duration_ms = playback.duration_ms()?;
        let mapper = TimelineMapper::new(geometry, duration_ms);

        let end_ms = config
            .initial_end_ms
            .map_or(duration_ms, |max_ms| max_ms.min(duration_ms));
        let end_px = if end_ms < duration_ms {
            mapper.ms_to_px(end_ms)
        } else {
            geometry.strip_width_px
        };

        if let Err(error) = playback.set_volume(1.0) {
            warn!(%error, "set volume failed");
        }
        let status = playback.status();

        info!(
            duration_ms,
            end_ms,
            thumbnail_count = geometry.thumbnail_count,
            strip_width_px = geometry.strip_width_px,
            "trim session started"
        );
        observer.on_change_end(end_ms);

        Ok(Self {
            mapper,
            playback: Some(playback),
            observer,
            start_px: 0.0,
            end_px,
            start_ms: 0,
            end_ms,
            playhead: PlayheadState {
                position_ms: status.position_ms,
                is_playing: status.is_playing,
            },
            playhead_px: mapper.ms_to_px(status.position_ms),
            drag: DragState::Idle,
            pause_pending: false,
        })
    }

    /// Begins a drag at `local_x` and returns the handle it controls.
    pub fn drag_start(&mut self, local_x: f64) -> Handle {
        let session = begin_drag(self.start_px, self.end_px, local_x);
        debug!(
            local_x,
            start_px = self.start_px,
            end_px = self.end_px,
            handle = ?session.active_handle,
            crossover_left_drag = session.crossover_left_drag,
            "drag started"
        );
        self.drag = DragState::Dragging(session);
        session.active_handle
    }

    /// Moves the dragged handle by `delta_x` pixels.
    ///
    /// Out-of-range moves and updates outside a drag leave the selection
    /// untouched and emit nothing.
    pub fn drag_update(&mut self, delta_x: f64) -> DragOutcome {
        let DragState::Dragging(session) = self.drag else {
            return DragOutcome::Rejected(DragRejection::NotDragging);
        };
        if !delta_x.is_finite() {
            return DragOutcome::Rejected(DragRejection::OutOfRange);
        }

        let handle = match resolve_move(
            &session,
            self.start_px,
            self.end_px,
            delta_x,
            self.mapper.strip_width_px(),
        ) {
            Ok(handle) => handle,
            Err(rejection) => {
                debug!(
                    delta_x,
                    start_px = self.start_px,
                    end_px = self.end_px,
                    "drag update dropped"
                );
                return DragOutcome::Rejected(rejection);
            }
        };

        let target_ms = match handle {
            Handle::Start => {
                self.start_px += delta_x;
                self.start_ms = self.mapper.px_to_ms(self.start_px);
                self.observer.on_change_start(self.start_ms);
                self.start_ms
            }
            Handle::End => {
                self.end_px += delta_x;
                self.end_ms = self.mapper.px_to_ms(self.end_px);
                self.observer.on_change_end(self.end_ms);
                self.end_ms
            }
        };
        debug!(?handle, delta_x, target_ms, "handle moved");
        self.call_playback("seek", |playback| playback.seek(target_ms));

        DragOutcome::Moved(handle)
    }

    /// Finishes the current drag. A crossed selection stays crossed.
    pub fn drag_end(&mut self) {
        if let DragState::Dragging(session) = self.drag {
            debug!(
                handle = ?session.active_handle,
                start_ms = self.start_ms,
                end_ms = self.end_ms,
                "drag ended"
            );
        }
        self.drag = DragState::Idle;
    }

    /// Applies one position report from the player.
    ///
    /// Playback that runs past the end handle is paused once. Reports that
    /// still claim to be playing after that pause are treated as stale until
    /// the player confirms it stopped.
    pub fn on_playback_tick(&mut self, status: PlaybackStatus) {
        if self.pause_pending {
            if status.is_playing {
                debug!(position_ms = status.position_ms, "stale playing tick ignored");
                return;
            }
            self.pause_pending = false;
        }

        if status.is_playing != self.playhead.is_playing {
            self.playhead.is_playing = status.is_playing;
            self.observer.on_change_playback_state(status.is_playing);
        }
        if !status.is_playing {
            return;
        }

        self.playhead.position_ms = status.position_ms;
        if status.position_ms > self.end_ms {
            info!(
                position_ms = status.position_ms,
                end_ms = self.end_ms,
                "playback reached end handle"
            );
            self.pause_playback();
        } else {
            self.playhead_px = self.mapper.ms_to_px(status.position_ms);
        }
    }

    /// Reads the player's status and applies it as a tick.
    pub fn poll_playback(&mut self) {
        let Some(status) = self.playback.as_ref().map(PlaybackControl::status) else {
            return;
        };
        self.on_playback_tick(status);
    }

    /// Plays the selection or pauses it, returning the new playing flag.
    ///
    /// Playback restarts from the start handle when the player already sits
    /// at or past the end handle.
    pub fn toggle_playback(&mut self) -> bool {
        if self.playhead.is_playing {
            self.pause_playback();
            return self.playhead.is_playing;
        }

        let position_ms = self
            .playback
            .as_ref()
            .map_or(self.playhead.position_ms, |playback| {
                playback.status().position_ms
            });
        if position_ms >= self.end_ms {
            let start_ms = self.start_ms;
            self.call_playback("seek", |playback| playback.seek(start_ms));
            self.playhead.position_ms = start_ms;
            self.playhead_px = self.mapper.ms_to_px(start_ms);
        }

        if self.call_playback("play", PlaybackControl::play) {
            self.pause_pending = false;
            self.playhead.is_playing = true;
            self.observer.on_change_playback_state(true);
        }
        self.playhead.is_playing
    }

    /// Ends the session and hands the player back.
    ///
    /// The player is paused and the observer receives a final `false`
    /// playing state before the handle is released.
    pub fn close(mut self) -> Option<P> {
        self.teardown()
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn start_px(&self) -> f64 {
        self.start_px
    }

    pub fn end_px(&self) -> f64 {
        self.end_px
    }

    pub fn playhead_px(&self) -> f64 {
        self.playhead_px
    }

    pub fn playhead(&self) -> PlayheadState {
        self.playhead
    }

    pub fn is_playing(&self) -> bool {
        self.playhead.is_playing
    }

    /// Handle under the current drag, if any.
    pub fn dragging_handle(&self) -> Option<Handle> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session.active_handle),
        }
    }

    /// True when the end handle sits left of the start handle.
    pub fn is_crossed(&self) -> bool {
        self.end_px < self.start_px
    }

    pub fn geometry(&self) -> TimelineGeometry {
        self.mapper.geometry()
    }

    pub fn duration_ms(&self) -> u64 {
        self.mapper.duration_ms()
    }

    pub fn start_label(&self) -> String {
        format_duration_label(self.start_ms)
    }

    pub fn end_label(&self) -> String {
        format_duration_label(self.end_ms)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn snapshot(&self) -> TrimSnapshot {
        TrimSnapshot {
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            start_px: self.start_px,
            end_px: self.end_px,
            playhead_px: self.playhead_px,
            position_ms: self.playhead.position_ms,
            is_playing: self.playhead.is_playing,
            dragging: self.dragging_handle(),
        }
    }

    fn pause_playback(&mut self) {
        if !self.call_playback("pause", PlaybackControl::pause) {
            return;
        }
        self.pause_pending = true;
        self.playhead.is_playing = false;
        self.observer.on_change_playback_state(false);
    }

    /// Runs one player command, absorbing failures. Returns whether it succeeded.
    fn call_playback(
        &mut self,
        operation: &'static str,
        command: impl FnOnce(&mut P) -> Result<()>,
    ) -> bool {
        let Some(playback) = self.playback.as_mut() else {
            return false;
        };
        match command(playback) {
            Ok(()) => true,
            Err(error) => {
                warn!(operation, %error, "playback command failed; player may be out of sync");
                false
            }
        }
    }

    fn teardown(&mut self) -> Option<P> {
        let mut playback = self.playback.take()?;
        if let Err(error) = playback.pause() {
            warn!(%error, "pause on close failed");
        }
        self.playhead.is_playing = false;
        self.drag = DragState::Idle;
        self.observer.on_change_playback_state(false);
        info!(
            start_ms = self.start_ms,
            end_ms = self.end_ms,
            "trim session closed"
        );
        Some(playback)
    }
}

impl<P, O> Drop for TrimSession<P, O>
where
    P: PlaybackControl,
    O: TrimObserver,
{
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}
