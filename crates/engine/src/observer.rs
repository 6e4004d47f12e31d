use serde::Serialize;

/// Notifications emitted by a trim session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrimEvent {
    StartChanged { ms: u64 },
    EndChanged { ms: u64 },
    PlaybackStateChanged { is_playing: bool },
}

/// Listener registered with a session at construction.
///
/// Every method defaults to doing nothing, so a host only overrides what it
/// cares about.
pub trait TrimObserver {
    fn on_change_start(&mut self, _start_ms: u64) {}

    fn on_change_end(&mut self, _end_ms: u64) {}

    fn on_change_playback_state(&mut self, _is_playing: bool) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TrimObserver for NoopObserver {}

/// Records notifications in emission order.
impl TrimObserver for Vec<TrimEvent> {
    fn on_change_start(&mut self, start_ms: u64) {
        self.push(TrimEvent::StartChanged { ms: start_ms });
    }

    fn on_change_end(&mut self, end_ms: u64) {
        self.push(TrimEvent::EndChanged { ms: end_ms });
    }

    fn on_change_playback_state(&mut self, is_playing: bool) {
        self.push(TrimEvent::PlaybackStateChanged { is_playing });
    }
}

impl<O> TrimObserver for &mut O
where
    O: TrimObserver + ?Sized,
{
    fn on_change_start(&mut self, start_ms: u64) {
        (**self).on_change_start(start_ms);
    }

    fn on_change_end(&mut self, end_ms: u64) {
        (**self).on_change_end(end_ms);
    }

    fn on_change_playback_state(&mut self, is_playing: bool) {
        (**self).on_change_playback_state(is_playing);
    }
}
