pub mod theme;
pub mod widgets;

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use eframe::egui;

use crate::config::AppConfig;
use crate::gui::widgets::VolumeGlyph;
use crate::keys::{KeyInjector, MediaKey, PlatformKeys};
use crate::marquee::Marquee;
use crate::media::NowPlaying;

/// Line shown before the monitor has reported anything at all
const LOADING_LINE: &str = "🎵 (loading...)";

/// Button layout: transport on top, volume below
const CHIP_GRID: [(usize, usize, MediaKey); 6] = [
    (0, 0, MediaKey::PrevTrack),
    (0, 1, MediaKey::PlayPause),
    (0, 2, MediaKey::NextTrack),
    (1, 0, MediaKey::VolumeDown),
    (1, 1, MediaKey::VolumeMute),
    (1, 2, MediaKey::VolumeUp),
];

/// The headline the marquee scrolls, music-note prefixed like a classic
/// now-playing ticker
fn marquee_line(info: Option<&NowPlaying>) -> String {
    match info {
        None => LOADING_LINE.to_string(),
        Some(info) => format!("🎵 {}", info.headline()),
    }
}

// Main application GUI - renders the remote and dispatches key presses
pub struct RemoteApp {
    /// User settings, owned here; saved on exit
    config: AppConfig,

    /// Receiver for media updates (monitor thread -> GUI)
    media_rx: Receiver<NowPlaying>,

    /// Media key dispatch
    keys: PlatformKeys,

    /// The single current record. None until the monitor first reports.
    now_playing: Option<NowPlaying>,

    /// Title scroller, plus the line currently installed in it
    marquee: Marquee,
    marquee_text: String,

    /// Cached album art texture + the track key it was decoded for
    album_art_texture: Option<egui::TextureHandle>,
    art_texture_key: Option<(String, String)>,

    /// Track window geometry to only log/persist changes
    last_window_pos: Option<egui::Pos2>,
    last_window_size: Option<egui::Vec2>,
}

impl RemoteApp {
    pub fn new(config: AppConfig, media_rx: Receiver<NowPlaying>, keys: PlatformKeys) -> Self {
        let mut marquee = Marquee::new(config.marquee.clone());
        let marquee_text = marquee_line(None);
        marquee.set_text(&marquee_text, Instant::now());

        Self {
            config,
            media_rx,
            keys,
            now_playing: None,
            marquee,
            marquee_text,
            album_art_texture: None,
            art_texture_key: None,
            last_window_pos: None,
            last_window_size: None,
        }
    }

    /// Drain the channel (latest record wins) and refresh marquee + art
    fn poll_media_updates(&mut self, ctx: &egui::Context, now: Instant) {
        let mut new_track = None;
        while let Ok(info) = self.media_rx.try_recv() {
            new_track = Some(info);
        }

        let Some(track) = new_track else { return };

        // Restart the scroll only when the visible line actually changes.
        // The monitor also reports play/pause flips, and those must not
        // snap a mid-scroll title back to the head.
        let line = marquee_line(Some(&track));
        if line != self.marquee_text {
            self.marquee.set_text(&line, now);
            self.marquee_text = line;
        }

        // Re-decode art only when the track actually changed
        let key = track.art_key();
        if self.art_texture_key.as_ref() != Some(&key) {
            self.album_art_texture = track.album_art.as_deref().and_then(|bytes| {
                match image::load_from_memory(bytes) {
                    Ok(decoded) => {
                        let size = [decoded.width() as usize, decoded.height() as usize];
                        let rgba = decoded.into_rgba8();
                        let pixels = rgba.as_flat_samples();
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());

                        // load into GPU
                        Some(ctx.load_texture("album_art", color_image, egui::TextureOptions::LINEAR))
                    }
                    Err(e) => {
                        tracing::warn!("[GUI] Failed to decode album art: {e}");
                        None
                    }
                }
            });
            self.art_texture_key = Some(key);
        }

        self.now_playing = Some(track);
    }

    /// Persist window moves/resizes into the config (saved on exit)
    fn track_window_geometry(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            let pos = rect.min;
            if self.last_window_pos != Some(pos) {
                // Skip the first detection to avoid log spam on startup
                if self.last_window_pos.is_some() {
                    tracing::debug!("[GUI] Window moved: x: {:.0}, y: {:.0}", pos.x, pos.y);
                }
                self.last_window_pos = Some(pos);
                self.config.window_position = Some([pos.x, pos.y]);
            }
        }

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            let size = rect.size();
            let changed = self.last_window_size.map_or(true, |ls| (ls - size).length() > 1.0);
            if changed {
                self.last_window_size = Some(size);
                self.config.window_size = [size.x, size.y];
            }
        }
    }

    fn draw_header(&self, ui: &egui::Ui, window: egui::Rect, now: Instant) -> f32 {
        let pad = theme::HEADER_PADDING;
        let art = self.config.art_size as f32;

        let art_rect = egui::Rect::from_min_size(
            egui::pos2(window.left() + pad, window.top() + pad),
            egui::vec2(art, art),
        );
        widgets::draw_album_art(ui, art_rect, self.album_art_texture.as_ref());

        let text_x = art_rect.right() + pad;
        let painter = ui.painter();

        painter.text(
            egui::pos2(text_x, art_rect.top() + 4.0),
            egui::Align2::LEFT_TOP,
            self.marquee.current_line(now),
            theme::title_font(),
            theme::TEXT,
        );

        let subline = self
            .now_playing
            .as_ref()
            .map(|info| info.subline().to_string())
            .unwrap_or_default();
        if !subline.is_empty() {
            painter.text(
                egui::pos2(text_x, art_rect.top() + 44.0),
                egui::Align2::LEFT_TOP,
                subline,
                theme::artist_font(),
                theme::TEXT_DIM,
            );
        }

        art_rect.bottom() + pad * 0.5
    }

    fn draw_button_grid(&mut self, ui: &mut egui::Ui, grid: egui::Rect) {
        let is_playing = self
            .now_playing
            .as_ref()
            .map(|info| info.is_playing)
            .unwrap_or(false);

        for (row, col, key) in CHIP_GRID {
            let rect = widgets::grid_cell_rect(grid, row, col, 2, 3, theme::CHIP_SPACING);
            let response = widgets::chip_button(ui, rect, key.label());

            match key {
                MediaKey::PrevTrack => widgets::draw_prev_glyph(ui, rect, theme::GLYPH),
                MediaKey::PlayPause => {
                    widgets::draw_play_pause_glyph(ui, rect, is_playing, theme::GLYPH)
                }
                MediaKey::NextTrack => widgets::draw_next_glyph(ui, rect, theme::GLYPH),
                MediaKey::VolumeDown => {
                    widgets::draw_volume_glyph(ui, rect, VolumeGlyph::Down, theme::GLYPH)
                }
                MediaKey::VolumeMute => {
                    widgets::draw_volume_glyph(ui, rect, VolumeGlyph::Mute, theme::GLYPH)
                }
                MediaKey::VolumeUp => {
                    widgets::draw_volume_glyph(ui, rect, VolumeGlyph::Up, theme::GLYPH)
                }
            }

            if response.clicked() {
                tracing::info!("[GUI] Button: {}", key.label());
                self.keys.press(key);
            }
        }
    }
}

impl eframe::App for RemoteApp {
    // Runs once when the window closes
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.config.save() {
            tracing::warn!("[GUI] Config save failed: {e:#}");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Escape closes the remote (handy inside VR where the titlebar
        // may be cropped away)
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.poll_media_updates(ctx, now);
        self.track_window_geometry(ctx);

        // Hide the cursor over the widget, it only distracts in the HUD
        if self.config.hide_cursor && ctx.input(|i| i.pointer.has_pointer()) {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        let frame = egui::Frame::central_panel(&ctx.style())
            .fill(theme::BG)
            .inner_margin(0.0);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let window = ui.available_rect_before_wrap();

            let header_bottom = self.draw_header(ui, window, now);

            let grid = egui::Rect::from_min_max(
                egui::pos2(window.left() + theme::GRID_PADDING, header_bottom),
                egui::pos2(
                    window.right() - theme::GRID_PADDING,
                    window.bottom() - theme::GRID_PADDING,
                ),
            );
            self.draw_button_grid(ui, grid);
        });

        // Wake up for the next marquee step or the next media poll,
        // whichever comes first
        let mut deadline = Duration::from_millis(self.config.poll_interval_ms.min(250));
        if let Some(step) = self.marquee.time_to_next_step(now) {
            deadline = deadline.min(step);
        }
        ctx.request_repaint_after(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (crossbeam_channel::Sender<NowPlaying>, RemoteApp) {
        let (tx, rx) = crossbeam_channel::bounded(8);
        let app = RemoteApp::new(AppConfig::default(), rx, PlatformKeys::new());
        (tx, app)
    }

    #[test]
    fn test_marquee_line_loading() {
        assert_eq!(marquee_line(None), "🎵 (loading...)");
    }

    #[test]
    fn test_marquee_line_artist_without_title() {
        let info = NowPlaying {
            session_active: true,
            artist: "Boards of Canada".to_string(),
            ..Default::default()
        };
        assert_eq!(marquee_line(Some(&info)), "🎵 (unknown)");
    }

    #[test]
    fn test_marquee_line_no_session() {
        let info = NowPlaying::default();
        assert_eq!(marquee_line(Some(&info)), "🎵 Nothing playing");
    }

    #[test]
    fn test_marquee_line_track() {
        let info = NowPlaying {
            session_active: true,
            title: "Kid A".to_string(),
            artist: "Radiohead".to_string(),
            ..Default::default()
        };
        assert_eq!(marquee_line(Some(&info)), "🎵 Kid A");
    }

    #[test]
    fn test_play_toggle_does_not_restart_scroll() {
        let ctx = egui::Context::default();
        let (tx, mut app) = test_app();
        let t0 = Instant::now();

        let mut track = NowPlaying {
            session_active: true,
            title: "A very long track title that definitely scrolls in the window".to_string(),
            artist: "Someone".to_string(),
            is_playing: true,
            ..Default::default()
        };
        tx.send(track.clone()).unwrap();
        app.poll_media_updates(&ctx, t0);
        assert!(app.marquee.is_scrolling());

        // Deep into the scroll, past the start pause
        let later = t0 + Duration::from_secs(10);
        let line_before = app.marquee.current_line(later);
        assert_ne!(line_before, app.marquee.current_line(t0));

        // Same track, only the playing flag flipped: the scroll position
        // must survive
        track.is_playing = false;
        tx.send(track.clone()).unwrap();
        app.poll_media_updates(&ctx, later);
        assert_eq!(app.marquee.current_line(later), line_before);
        assert_eq!(app.now_playing.as_ref().map(|i| i.is_playing), Some(false));

        // A real track change still restarts from the head
        track.title = "Another long track title that also needs to scroll".to_string();
        tx.send(track).unwrap();
        app.poll_media_updates(&ctx, later);
        assert!(app.marquee.current_line(later).starts_with("🎵 Another"));
    }

    #[test]
    fn test_chip_grid_covers_every_key_once() {
        let mut labels: Vec<&str> = CHIP_GRID.iter().map(|(_, _, k)| k.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 6);

        // All six cells of the 2x3 grid are used exactly once
        let mut cells: Vec<(usize, usize)> = CHIP_GRID.iter().map(|(r, c, _)| (*r, *c)).collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|(r, c)| *r < 2 && *c < 3));
    }
}
