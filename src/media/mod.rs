use std::time::Duration;

use crossbeam_channel::Sender;

/// Snapshot of the system's current media session.
///
/// One record at a time -- the monitor overwrites rather than accumulates,
/// and the GUI only ever shows the latest one it drained.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub is_playing: bool,

    /// Friendly name of the app that owns the session ("Spotify", "Chrome")
    pub source_app: String,

    /// Raw encoded image bytes (PNG/JPEG), decoded on the GUI side
    pub album_art: Option<Vec<u8>>,

    /// False when there is no media session at all. Distinct from a session
    /// that reports empty metadata.
    pub session_active: bool,
}

impl NowPlaying {
    /// The big line the marquee scrolls. Placeholder strings cover the two
    /// degenerate states so the widget never shows stale text.
    pub fn headline(&self) -> String {
        if !self.session_active {
            return "Nothing playing".to_string();
        }
        if self.title.is_empty() && self.artist.is_empty() {
            return "Playing (no metadata)".to_string();
        }
        if self.title.is_empty() {
            // Artist known but no title: never show a blank headline
            return "(unknown)".to_string();
        }
        self.title.clone()
    }

    /// Secondary line under the title. Empty when there is nothing useful.
    pub fn subline(&self) -> &str {
        if self.session_active {
            &self.artist
        } else {
            ""
        }
    }

    /// Key used to decide whether the album art needs re-fetching
    pub fn art_key(&self) -> (String, String) {
        (self.title.clone(), self.artist.clone())
    }
}

/// Errors out of the platform media backends
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media session manager unavailable: {0}")]
    ManagerUnavailable(String),

    #[error("async runtime failed to start: {0}")]
    Runtime(String),
}

/// Trait for monitoring media state (Events)
pub trait MediaMonitor {
    /// Starts the background poll thread. Deduplicated updates are sent via
    /// the provided channel every `poll_interval` at most.
    fn start(&self, tx: Sender<NowPlaying>, poll_interval: Duration);
}

// ==============================================================
// OS SELECTION FACTORY
// ==============================================================

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub type PlatformMedia = windows::WindowsMediaSession;

// Fallback for everything else: the UI still runs, it just never hears
// about any tracks
#[cfg(not(target_os = "windows"))]
mod dummy;
#[cfg(not(target_os = "windows"))]
pub type PlatformMedia = dummy::DummyMediaSession;
