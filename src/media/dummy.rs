use std::time::Duration;

use crossbeam_channel::Sender;

use super::{MediaMonitor, NowPlaying};

/// Stub backend for platforms without a supported media session API.
/// The window still comes up, it just shows "Nothing playing" forever.
#[derive(Clone)]
pub struct DummyMediaSession;

impl DummyMediaSession {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyMediaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaMonitor for DummyMediaSession {
    fn start(&self, tx: Sender<NowPlaying>, _poll_interval: Duration) {
        tracing::warn!("[Media/Dummy] No media session backend on this platform");
        // One explicit "nothing" record so the UI leaves its loading state
        let _ = tx.send(NowPlaying::default());
    }
}
