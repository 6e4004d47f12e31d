use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use trim_engine::{
    DragOutcome, Handle, PlaybackControl, PlaybackStatus, Result, TrimConfig, TrimEvent,
    TrimSession, fraction_to_ms, ms_to_px, px_to_fraction,
};

/// Player whose clock only moves when the test advances it.
#[derive(Debug, Default)]
struct SteppedPlayer {
    duration_ms: u64,
    position_ms: u64,
    playing: bool,
    seeks: Vec<u64>,
    pauses: usize,
}

impl SteppedPlayer {
    fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    fn advance(&mut self, elapsed_ms: u64) {
        if self.playing {
            self.position_ms = (self.position_ms + elapsed_ms).min(self.duration_ms);
        }
    }
}

impl PlaybackControl for SteppedPlayer {
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
        self.position_ms = position_ms;
        self.seeks.push(position_ms);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        self.pauses += 1;
        Ok(())
    }

    fn set_volume(&mut self, _level: f64) -> Result<()> {
        Ok(())
    }
}

fn config() -> TrimConfig {
    TrimConfig {
        viewer_width_px: 300.0,
        viewer_height_px: 50.0,
        ..TrimConfig::default()
    }
}

/// Shared handle so the test can move the clock while the session holds the player.
#[derive(Debug, Clone)]
struct SharedPlayer(Rc<RefCell<SteppedPlayer>>);

impl PlaybackControl for SharedPlayer {
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

#[test]
fn trimmed_range_plays_from_start_handle_and_stops_at_end_handle() {
    let player = Rc::new(RefCell::new(SteppedPlayer::new(60_000)));
    let mut events: Vec<TrimEvent> = Vec::new();
    let mut session = TrimSession::new(&config(), SharedPlayer(Rc::clone(&player)), &mut events)
        .expect("session should start");

    assert_eq!(session.drag_start(20.0), Handle::Start);
    assert_eq!(session.drag_update(30.0), DragOutcome::Moved(Handle::Start));
    session.drag_end();
    assert_eq!(session.drag_start(280.0), Handle::End);
    assert_eq!(session.drag_update(-150.0), DragOutcome::Moved(Handle::End));
    session.drag_end();
    assert_eq!((session.start_ms(), session.end_ms()), (6_000, 30_000));

    assert!(session.toggle_playback());
    session.poll_playback();
    assert_relative_eq!(session.playhead_px(), 30.0);

    let mut polls = 0;
    while session.is_playing() && polls < 100 {
        player.borrow_mut().advance(1_000);
        session.poll_playback();
        polls += 1;
    }

    assert!(!session.is_playing());
    assert_eq!(player.borrow().position_ms, 31_000);
    assert_eq!(player.borrow().pauses, 1);
    assert_relative_eq!(session.playhead_px(), 150.0);
    drop(session);

    assert_eq!(player.borrow().seeks, vec![6_000, 30_000, 6_000]);
    assert!(events.contains(&TrimEvent::StartChanged { ms: 6_000 }));
    assert!(events.contains(&TrimEvent::EndChanged { ms: 30_000 }));
}

#[test]
fn range_end_pauses_once_while_ticks_keep_arriving() {
    let mut player = SteppedPlayer::new(10_000);
    let mut events: Vec<TrimEvent> = Vec::new();
    let mut session =
        TrimSession::new(&config(), &mut player, &mut events).expect("session should start");

    session.drag_start(300.0);
    session.drag_update(-150.0);
    session.drag_end();
    assert_eq!(session.end_ms(), 5_000);

    for position_ms in (5_500..=7_000).step_by(500) {
        session.on_playback_tick(PlaybackStatus {
            position_ms,
            is_playing: true,
        });
    }
    assert!(!session.is_playing());
    drop(session);

    assert_eq!(player.pauses, 2, "one auto-pause plus the close");
    let stopped = events
        .iter()
        .filter(|event| **event == TrimEvent::PlaybackStateChanged { is_playing: false })
        .count();
    assert_eq!(stopped, 2, "one auto-pause plus the close");
}

#[test]
fn pixel_time_round_trip_is_stable() {
    let duration_ms = 90_000;
    let strip_width_px = 350.0;
    for step in 0..=100 {
        let fraction = f64::from(step) / 100.0;
        let ms = fraction_to_ms(fraction, duration_ms);
        let px = ms_to_px(ms, duration_ms, strip_width_px);
        assert_relative_eq!(px_to_fraction(px, strip_width_px), fraction, epsilon = 1e-4);
    }
}
