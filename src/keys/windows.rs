use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
    VIRTUAL_KEY, VK_MEDIA_NEXT_TRACK, VK_MEDIA_PLAY_PAUSE, VK_MEDIA_PREV_TRACK, VK_VOLUME_DOWN,
    VK_VOLUME_MUTE, VK_VOLUME_UP,
};

use super::{KeyInjector, MediaKey};

#[derive(Clone)]
pub struct WindowsKeyInjector;

impl WindowsKeyInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsKeyInjector {
    fn default() -> Self {
        Self::new()
    }
}

fn virtual_key(key: MediaKey) -> VIRTUAL_KEY {
    match key {
        MediaKey::PlayPause => VK_MEDIA_PLAY_PAUSE,
        MediaKey::NextTrack => VK_MEDIA_NEXT_TRACK,
        MediaKey::PrevTrack => VK_MEDIA_PREV_TRACK,
        MediaKey::VolumeUp => VK_VOLUME_UP,
        MediaKey::VolumeDown => VK_VOLUME_DOWN,
        MediaKey::VolumeMute => VK_VOLUME_MUTE,
    }
}

fn key_event(vk: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

impl KeyInjector for WindowsKeyInjector {
    fn press(&self, key: MediaKey) {
        let vk = virtual_key(key);

        // Full press: down followed by up, in a single SendInput batch so
        // nothing can interleave between the two events
        let inputs = [
            key_event(vk, KEYBD_EVENT_FLAGS(0)),
            key_event(vk, KEYEVENTF_KEYUP),
        ];

        let injected = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        if injected == 0 {
            tracing::warn!("[Keys/Windows] SendInput injected 0 events for {}", key.label());
        } else {
            tracing::debug!("[Keys/Windows] Pressed {}", key.label());
        }
    }
}
