/// The six hardware-style media keys the remote can inject.
///
/// Injection (rather than talking to the session directly) is the point:
/// whichever application currently owns media focus reacts, exactly as if
/// the user pressed the key on a keyboard. Volume has no session API at
/// all, so the volume keys only exist in this form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKey {
    PlayPause,
    NextTrack,
    PrevTrack,
    VolumeUp,
    VolumeDown,
    VolumeMute,
}

impl MediaKey {
    /// Stable name for logs and the test harness
    pub fn label(&self) -> &'static str {
        match self {
            MediaKey::PlayPause => "play/pause",
            MediaKey::NextTrack => "next track",
            MediaKey::PrevTrack => "previous track",
            MediaKey::VolumeUp => "volume up",
            MediaKey::VolumeDown => "volume down",
            MediaKey::VolumeMute => "volume mute",
        }
    }
}

/// Trait for sending a media key press (down + up) to the OS
pub trait KeyInjector: Send + Sync {
    fn press(&self, key: MediaKey);
}

// ==============================================================
// OS SELECTION FACTORY
// ==============================================================

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub type PlatformKeys = windows::WindowsKeyInjector;

#[cfg(not(target_os = "windows"))]
mod dummy;
#[cfg(not(target_os = "windows"))]
pub type PlatformKeys = dummy::DummyKeyInjector;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_distinct() {
        let keys = [
            MediaKey::PlayPause,
            MediaKey::NextTrack,
            MediaKey::PrevTrack,
            MediaKey::VolumeUp,
            MediaKey::VolumeDown,
            MediaKey::VolumeMute,
        ];

        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
