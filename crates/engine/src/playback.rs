use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One position report from the playback collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub position_ms: u64,
    pub is_playing: bool,
}

/// Transport operations a trim session needs from the video player.
///
/// The session never owns the player lifecycle. Hosts usually hand in a
/// `&mut` borrow, which implements this trait through the blanket impl below.
pub trait PlaybackControl {
    /// Total video length reported by the player.
    fn duration_ms(&self) -> Result<u64>;

    /// Latest position and playing flag, for hosts that poll.
    fn status(&self) -> PlaybackStatus;

    fn seek(&mut self, position_ms: u64) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Sets output volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, level: f64) -> Result<()>;
}

impl<P> PlaybackControl for &mut P
where
    P: PlaybackControl + ?Sized,
{
    fn duration_ms(&self) -> Result<u64> {
        (**self).duration_ms()
    }

    fn status(&self) -> PlaybackStatus {
        (**self).status()
    }

    fn seek(&mut self, position_ms: u64) -> Result<()> {
        (**self).seek(position_ms)
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) -> Result<()> {
        (**self).pause()
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        (**self).set_volume(level)
    }
}
