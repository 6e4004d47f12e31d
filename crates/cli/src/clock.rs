use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use trim_engine::{PlaybackControl, PlaybackStatus, Result, TrimError};

/// Playback clock standing in for a real video player.
///
/// Time only moves through [`ClockPlayer::advance`]; reaching the end of the
/// video stops playback the way a player does at end of stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockPlayer {
    duration_ms: u64,
    position_ms: u64,
    playing: bool,
    volume: f64,
}

impl ClockPlayer {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            position_ms: 0,
            playing: false,
            volume: 0.0,
        }
    }

    pub fn advance(&mut self, elapsed_ms: u64) {
        if !self.playing {
            return;
        }
        self.position_ms = self.position_ms.saturating_add(elapsed_ms).min(self.duration_ms);
        if self.position_ms == self.duration_ms {
            debug!(position_ms = self.position_ms, "clock reached end of video");
            self.playing = false;
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl PlaybackControl for ClockPlayer {
    fn duration_ms(&self) -> Result<u64> {
        Ok(self.duration_ms)
    }

    fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            position_ms: self.position_ms,
            is_playing: self.playing,
        }
    }

    fn seek(&mut self, position_ms: u64) -> Result<()> {
        if position_ms > self.duration_ms {
            return Err(TrimError::PlaybackDesync {
                operation: "seek",
                reason: format!(
                    "position {position_ms}ms is past the end ({}ms)",
                    self.duration_ms
                ),
            });
        }
        self.position_ms = position_ms;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.position_ms >= self.duration_ms {
            self.position_ms = 0;
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        self.volume = level.clamp(0.0, 1.0);
        Ok(())
    }
}

/// Shared handle that lets the host move the clock while a session drives it.
#[derive(Debug, Clone)]
pub struct ClockHandle(Rc<RefCell<ClockPlayer>>);

impl ClockHandle {
    pub fn new(player: ClockPlayer) -> Self {
        Self(Rc::new(RefCell::new(player)))
    }

    pub fn advance(&self, elapsed_ms: u64) {
        self.0.borrow_mut().advance(elapsed_ms);
    }

    pub fn snapshot(&self) -> ClockPlayer {
        self.0.borrow().clone()
    }
}

impl PlaybackControl for ClockHandle {
    fn duration_ms(&self) -> Result<u64> {
        self.0.borrow().duration_ms()
    }

    fn status(&self) -> PlaybackStatus {
        self.0.borrow().status()
    }

    fn seek(&mut self, position_ms: u64) -> Result<()> {
        self.0.borrow_mut().seek(position_ms)
    }

    fn play(&mut self) -> Result<()> {
        self.0.borrow_mut().play()
    }

    fn pause(&mut self) -> Result<()> {
        self.0.borrow_mut().pause()
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        self.0.borrow_mut().set_volume(level)
    }
}

#[cfg(test)]
mod tests {
    use trim_engine::PlaybackControl;

    use super::{ClockHandle, ClockPlayer};

    #[test]
    fn clock_only_moves_while_playing() {
        let mut player = ClockPlayer::new(5_000);
        player.advance(1_000);
        assert_eq!(player.status().position_ms, 0);

        player.play().expect("play");
        player.advance(1_000);
        assert_eq!(player.status().position_ms, 1_000);
    }

    #[test]
    fn clock_stops_at_end_of_video() {
        let mut player = ClockPlayer::new(5_000);
        player.play().expect("play");
        player.advance(9_000);

        let status = player.status();
        assert_eq!(status.position_ms, 5_000);
        assert!(!status.is_playing);
    }

    #[test]
    fn seek_past_end_is_rejected() {
        let mut player = ClockPlayer::new(5_000);
        assert!(player.seek(6_000).is_err());
        assert_eq!(player.status().position_ms, 0);
    }

    #[test]
    fn handle_shares_one_clock() {
        let mut handle = ClockHandle::new(ClockPlayer::new(5_000));
        let other = handle.clone();

        handle.play().expect("play");
        other.advance(2_000);

        assert_eq!(handle.status().position_ms, 2_000);
        assert!(other.snapshot().status().is_playing);
    }
}
