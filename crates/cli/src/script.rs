use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use trim_engine::{PlaybackStatus, TrimObserver, TrimSession};

use crate::clock::ClockHandle;
use crate::error::CliError;

/// One host event replayed against a session.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    DragStart { x: f64 },
    DragUpdate { dx: f64 },
    DragEnd,
    TogglePlayback,
    /// Moves the clock forward, then polls the player.
    Advance { ms: u64 },
    /// Pushes a position report without touching the clock.
    Tick { position_ms: u64, is_playing: bool },
}

pub fn load_script(path: &Path) -> Result<Vec<Step>, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ScriptIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&raw).map_err(|source| CliError::ScriptParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_script(raw: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Feeds one step to the session, advancing `clock` where the step asks for it.
pub fn apply_step<O>(session: &mut TrimSession<ClockHandle, O>, clock: &ClockHandle, step: Step)
where
    O: TrimObserver,
{
    debug!(?step, "applying step");
    match step {
        Step::DragStart { x } => {
            session.drag_start(x);
        }
        Step::DragUpdate { dx } => {
            let outcome = session.drag_update(dx);
            debug!(?outcome, "drag update applied");
        }
        Step::DragEnd => session.drag_end(),
        Step::TogglePlayback => {
            session.toggle_playback();
        }
        Step::Advance { ms } => {
            clock.advance(ms);
            session.poll_playback();
        }
        Step::Tick {
            position_ms,
            is_playing,
        } => session.on_playback_tick(PlaybackStatus {
            position_ms,
            is_playing,
        }),
    }
}
