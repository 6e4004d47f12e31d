use std::io::Write;

use serde::Serialize;
use trim_engine::{TrimEvent, TrimObserver};

/// Writes every session notification as one JSON line.
///
/// Observer callbacks cannot fail, so the first write error is kept and
/// reported by [`JsonLinesObserver::finish`].
#[derive(Debug)]
pub struct JsonLinesObserver<W> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W> JsonLinesObserver<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn write_line<T>(&mut self, value: &T)
    where
        T: Serialize + ?Sized,
    {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, value)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(error) = result {
            self.error = Some(error);
        }
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W> TrimObserver for JsonLinesObserver<W>
where
    W: Write,
{
    fn on_change_start(&mut self, start_ms: u64) {
        self.write_line(&TrimEvent::StartChanged { ms: start_ms });
    }

    fn on_change_end(&mut self, end_ms: u64) {
        self.write_line(&TrimEvent::EndChanged { ms: end_ms });
    }

    fn on_change_playback_state(&mut self, is_playing: bool) {
        self.write_line(&TrimEvent::PlaybackStateChanged { is_playing });
    }
}
