use eframe::egui::{self, Color32, Pos2, Rect, Response, Sense, Shape, Stroke, TextureHandle, Ui};

use crate::gui::theme;

// =======================================================================================
// LAYOUT
// =======================================================================================

/// Cell rect for a fixed grid with even spacing between cells.
/// Pure geometry so the 2x3 button layout is testable.
pub fn grid_cell_rect(grid: Rect, row: usize, col: usize, rows: usize, cols: usize, spacing: f32) -> Rect {
    let cell_w = (grid.width() - spacing * (cols.saturating_sub(1)) as f32) / cols as f32;
    let cell_h = (grid.height() - spacing * (rows.saturating_sub(1)) as f32) / rows as f32;

    let min = egui::pos2(
        grid.left() + col as f32 * (cell_w + spacing),
        grid.top() + row as f32 * (cell_h + spacing),
    );
    Rect::from_min_size(min, egui::vec2(cell_w, cell_h))
}

// =======================================================================================
// CHIP BUTTON
// =======================================================================================

/// Flat "chip" button: dark rounded rect, lighter while hovered or held.
/// The caller paints the glyph on top of the returned rect.
pub fn chip_button(ui: &mut Ui, rect: Rect, id_salt: &str) -> Response {
    let response = ui.interact(rect, ui.id().with(id_salt), Sense::click());

    let fill = if response.hovered() || response.is_pointer_button_down_on() {
        theme::CHIP_BG_ACTIVE
    } else {
        theme::CHIP_BG
    };
    ui.painter()
        .rect_filled(rect, theme::CHIP_ROUNDING, fill);

    response
}

// =======================================================================================
// GLYPHS  (painter-drawn, ISO 60417 transport geometry)
// =======================================================================================

/// Play/pause chip glyph: pause bars while playing, play triangle otherwise
pub fn draw_play_pause_glyph(ui: &Ui, rect: Rect, is_playing: bool, color: Color32) {
    let painter = ui.painter();
    let c = rect.center();
    let h = glyph_extent(rect);

    if is_playing {
        // PAUSE (ISO 60417-5111B)
        let bar_w = h * 0.28;
        let gap = h * 0.22;

        painter.rect_filled(
            Rect::from_min_size(
                egui::pos2(c.x - gap / 2.0 - bar_w, c.y - h / 2.0),
                egui::vec2(bar_w, h),
            ),
            1.0,
            color,
        );
        painter.rect_filled(
            Rect::from_min_size(egui::pos2(c.x + gap / 2.0, c.y - h / 2.0), egui::vec2(bar_w, h)),
            1.0,
            color,
        );
    } else {
        // PLAY (ISO 60417-5107B), nudged right so it reads centered
        let optical_offset = h * 0.1;
        let w = h * 0.85;

        let tip = egui::pos2(c.x + w / 2.0 + optical_offset, c.y);
        let base_x = c.x - w / 2.0 + optical_offset;

        painter.add(Shape::convex_polygon(
            vec![
                tip,
                egui::pos2(base_x, c.y - h / 2.0),
                egui::pos2(base_x, c.y + h / 2.0),
            ],
            color,
            Stroke::NONE,
        ));
    }
}

/// NEXT (ISO 60417-5862): triangle into a right bar
pub fn draw_next_glyph(ui: &Ui, rect: Rect, color: Color32) {
    let painter = ui.painter();
    let c = rect.center();
    let h = glyph_extent(rect);
    let w = h;
    let bar_w = h * 0.16;

    // Right Bar
    painter.rect_filled(
        Rect::from_min_size(
            egui::pos2(c.x + w / 2.0 - bar_w, c.y - h / 2.0),
            egui::vec2(bar_w, h),
        ),
        0.5,
        color,
    );

    // Right Triangle
    let tip = egui::pos2(c.x + w / 2.0 - bar_w - 1.0, c.y);
    let base_x = c.x - w / 2.0;
    painter.add(Shape::convex_polygon(
        vec![
            tip,
            egui::pos2(base_x, c.y - h / 2.0),
            egui::pos2(base_x, c.y + h / 2.0),
        ],
        color,
        Stroke::NONE,
    ));
}

/// PREVIOUS (ISO 60417-5861): left bar, triangle pointing at it
pub fn draw_prev_glyph(ui: &Ui, rect: Rect, color: Color32) {
    let painter = ui.painter();
    let c = rect.center();
    let h = glyph_extent(rect);
    let w = h;
    let bar_w = h * 0.16;

    // Left bar
    painter.rect_filled(
        Rect::from_min_size(egui::pos2(c.x - w / 2.0, c.y - h / 2.0), egui::vec2(bar_w, h)),
        0.5,
        color,
    );

    // Left triangle
    let tip = egui::pos2(c.x - w / 2.0 + bar_w + 1.0, c.y);
    let base_x = c.x + w / 2.0;
    painter.add(Shape::convex_polygon(
        vec![
            tip,
            egui::pos2(base_x, c.y - h / 2.0),
            egui::pos2(base_x, c.y + h / 2.0),
        ],
        color,
        Stroke::NONE,
    ));
}

/// Which speaker glyph a volume chip carries
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VolumeGlyph {
    Down,
    Mute,
    Up,
}

/// Speaker with 0-2 sound waves, or a mute cross
pub fn draw_volume_glyph(ui: &Ui, rect: Rect, glyph: VolumeGlyph, color: Color32) {
    let painter = ui.painter();
    let c = rect.center();
    let h = glyph_extent(rect);

    // Shift the speaker left to make room for waves / the cross
    let spk_x = c.x - h * 0.35;

    // Speaker body (small rect) + cone (trapezoid as a convex polygon)
    let body_w = h * 0.22;
    let body_h = h * 0.4;
    painter.rect_filled(
        Rect::from_center_size(egui::pos2(spk_x - body_w, c.y), egui::vec2(body_w, body_h)),
        0.5,
        color,
    );
    painter.add(Shape::convex_polygon(
        vec![
            egui::pos2(spk_x - body_w / 2.0, c.y - body_h / 2.0),
            egui::pos2(spk_x + body_w * 1.2, c.y - h / 2.0),
            egui::pos2(spk_x + body_w * 1.2, c.y + h / 2.0),
            egui::pos2(spk_x - body_w / 2.0, c.y + body_h / 2.0),
        ],
        color,
        Stroke::NONE,
    ));

    let stroke = Stroke::new((h * 0.12).max(1.5), color);
    let wave_x = spk_x + body_w * 1.2 + h * 0.25;

    match glyph {
        VolumeGlyph::Down => {
            // Single small wave
            painter.add(Shape::line(arc_points(wave_x, c.y, h * 0.28), stroke));
        }
        VolumeGlyph::Up => {
            // Two waves
            painter.add(Shape::line(arc_points(wave_x, c.y, h * 0.28), stroke));
            painter.add(Shape::line(arc_points(wave_x, c.y, h * 0.52), stroke));
        }
        VolumeGlyph::Mute => {
            // Cross
            let r = h * 0.28;
            let cx = wave_x + r * 0.5;
            painter.line_segment(
                [egui::pos2(cx - r, c.y - r), egui::pos2(cx + r, c.y + r)],
                stroke,
            );
            painter.line_segment(
                [egui::pos2(cx - r, c.y + r), egui::pos2(cx + r, c.y - r)],
                stroke,
            );
        }
    }
}

/// Polyline approximating a sound-wave arc bulging to the right
fn arc_points(x: f32, cy: f32, radius: f32) -> Vec<Pos2> {
    const SEGMENTS: usize = 10;
    // Sweep from -60° to +60°
    let start = -std::f32::consts::FRAC_PI_3;
    let sweep = 2.0 * std::f32::consts::FRAC_PI_3;

    (0..=SEGMENTS)
        .map(|i| {
            let angle = start + sweep * (i as f32 / SEGMENTS as f32);
            egui::pos2(x + radius * angle.cos() - radius * 0.5, cy + radius * angle.sin())
        })
        .collect()
}

fn glyph_extent(rect: Rect) -> f32 {
    (rect.height().min(rect.width()) * 0.4).max(8.0)
}

// =======================================================================================
// ALBUM ART
// =======================================================================================

/// Fixed-size art box: backing square always painted, texture on top when
/// a thumbnail decoded
pub fn draw_album_art(ui: &Ui, rect: Rect, texture: Option<&TextureHandle>) {
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, theme::ART_BOX_BG);

    if let Some(texture) = texture {
        painter.image(
            texture.id(),
            rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}
