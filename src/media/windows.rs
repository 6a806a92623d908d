use std::time::Duration;

use crossbeam_channel::Sender;
use windows::Media::Control::{
    GlobalSystemMediaTransportControlsSession, GlobalSystemMediaTransportControlsSessionManager,
    GlobalSystemMediaTransportControlsSessionPlaybackStatus,
};
use windows::Storage::Streams::DataReader;

use super::{MediaError, MediaMonitor, NowPlaying};

#[derive(Clone)]
pub struct WindowsMediaSession;

impl WindowsMediaSession {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsMediaSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper function to clean up Windows App Ids.
/// "Microsoft.ZuneMusic_8wekyb3d8bbwe!Microsoft.ZuneMusic" and "Spotify.exe"
/// both come through here.
fn clean_app_name(raw_id: &str) -> String {
    let stage1 = raw_id.split('!').last().unwrap_or(raw_id);
    let stage2 = stage1.split('.').next().unwrap_or(stage1);
    let mut chars = stage2.chars();
    match chars.next() {
        None => String::new(),
        Some(f) => format!("{}{}", f.to_uppercase(), chars.as_str().to_lowercase()),
    }
}

/// Request the session manager once per monitor thread.
/// RequestAsync is an expensive IPC call, we must not do it in the loop.
fn request_manager(
    rt: &tokio::runtime::Runtime,
) -> Result<GlobalSystemMediaTransportControlsSessionManager, MediaError> {
    rt.block_on(async {
        let op = GlobalSystemMediaTransportControlsSessionManager::RequestAsync()
            .map_err(|e| MediaError::ManagerUnavailable(e.to_string()))?;
        op.await
            .map_err(|e| MediaError::ManagerUnavailable(e.to_string()))
    })
}

/// Read one snapshot from the session. Art is only fetched when the
/// (title, artist) key moved away from `cached_key`.
async fn read_session(
    session: &GlobalSystemMediaTransportControlsSession,
    cached_key: &mut Option<(String, String)>,
    cached_art: &mut Option<Vec<u8>>,
) -> NowPlaying {
    // Source App Id
    let app_id_raw = session
        .SourceAppUserModelId()
        .ok()
        .map(|h| h.to_string())
        .unwrap_or_default();

    // Playback Info
    let is_playing = session
        .GetPlaybackInfo()
        .ok()
        .and_then(|i| i.PlaybackStatus().ok())
        .map(|s| s == GlobalSystemMediaTransportControlsSessionPlaybackStatus::Playing)
        .unwrap_or(false);

    let mut info = NowPlaying {
        source_app: clean_app_name(&app_id_raw),
        is_playing,
        session_active: true,
        ..Default::default()
    };

    // Metadata
    let props = match session.TryGetMediaPropertiesAsync() {
        Ok(op) => match op.await {
            Ok(props) => props,
            Err(_) => return info,
        },
        Err(_) => return info,
    };

    info.title = props.Title().ok().map(|h| h.to_string()).unwrap_or_default();
    info.artist = props.Artist().ok().map(|h| h.to_string()).unwrap_or_default();
    info.album = props
        .AlbumTitle()
        .ok()
        .map(|h| h.to_string())
        .unwrap_or_default();

    // --- LAZY ART LOADING ---
    let current_key = info.art_key();
    if Some(&current_key) == cached_key.as_ref() {
        // Same track? Reuse the bytes from memory.
        info.album_art = cached_art.clone();
    } else {
        info.album_art = load_thumbnail(&props).await;
        *cached_key = Some(current_key);
        *cached_art = info.album_art.clone();
    }

    info
}

async fn load_thumbnail(
    props: &windows::Media::Control::GlobalSystemMediaTransportControlsSessionMediaProperties,
) -> Option<Vec<u8>> {
    let thumb_ref = props.Thumbnail().ok()?;
    let stream = thumb_ref.OpenReadAsync().ok()?.await.ok()?;
    let size = stream.Size().unwrap_or(0);
    if size == 0 {
        return None;
    }

    let reader = DataReader::CreateDataReader(&stream).ok()?;
    reader.LoadAsync(size as u32).ok()?.await.ok()?;
    let mut bytes = vec![0u8; size as usize];
    reader.ReadBytes(&mut bytes).ok()?;
    Some(bytes)
}

impl MediaMonitor for WindowsMediaSession {
    fn start(&self, tx: Sender<NowPlaying>, poll_interval: Duration) {
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("[Media/Windows] {}", MediaError::Runtime(e.to_string()));
                    // One empty record so the GUI drops out of its loading
                    // state and shows "Nothing playing"
                    let _ = tx.send(NowPlaying::default());
                    return;
                }
            };

            let manager = match request_manager(&rt) {
                Ok(m) => m,
                Err(e) => {
                    // Without the manager there is nothing to poll
                    tracing::error!("[Media/Windows] {e}");
                    let _ = tx.send(NowPlaying::default());
                    return;
                }
            };

            tracing::info!("[Media/Windows] Background monitor started");

            // Dedup state, plus the lazy art cache keyed on (title, artist)
            let mut last_sent: Option<NowPlaying> = None;
            let mut cached_key: Option<(String, String)> = None;
            let mut cached_art: Option<Vec<u8>> = None;

            loop {
                let info = match manager.GetCurrentSession() {
                    Ok(session) => {
                        rt.block_on(read_session(&session, &mut cached_key, &mut cached_art))
                    }
                    // No session right now (nothing playing anywhere)
                    Err(_) => NowPlaying::default(),
                };

                if last_sent.as_ref() != Some(&info) {
                    if info.session_active {
                        tracing::info!(
                            "[Media/Windows] Update: {} - {} ({}, {})",
                            info.artist,
                            info.title,
                            info.source_app,
                            if info.is_playing { "playing" } else { "paused" }
                        );
                    } else {
                        tracing::info!("[Media/Windows] No active media session");
                    }

                    // GUI gone means we are shutting down
                    if tx.send(info.clone()).is_err() {
                        tracing::info!("[Media/Windows] Receiver dropped, monitor exiting");
                        break;
                    }
                    last_sent = Some(info);
                }

                std::thread::sleep(poll_interval);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_app_name_standard_exe() {
        assert_eq!(clean_app_name("Spotify.exe"), "Spotify");
        assert_eq!(clean_app_name("chrome.exe"), "Chrome");
        assert_eq!(clean_app_name("firefox"), "Firefox");
    }

    #[test]
    fn test_clean_app_name_uwp() {
        let raw = "Microsoft.ZuneMusic_8wekyb3d8bbwe!Microsoft.ZuneMusic";
        assert_eq!(clean_app_name(raw), "Microsoft");
    }

    #[test]
    fn test_clean_app_name_edge_cases() {
        assert_eq!(clean_app_name(""), "");
        assert_eq!(clean_app_name("My.Cool.App.exe"), "My");
        assert_eq!(clean_app_name("simple"), "Simple");
    }
}
