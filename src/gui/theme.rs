use egui::{Color32, FontFamily, FontId};

// === VR Overlay Design Tokens ===
// Near-black flat palette: bright saturated UI bleeds badly through VR
// overlay compositing, dark chips on #111 do not.

/// Window background
pub const BG: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

/// Button chip at rest
pub const CHIP_BG: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);

/// Button chip while hovered/pressed
pub const CHIP_BG_ACTIVE: Color32 = Color32::from_rgb(0x2a, 0x2a, 0x2a);

/// Backing square behind the album art (visible when there is no art)
pub const ART_BOX_BG: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);

/// Primary text
pub const TEXT: Color32 = Color32::WHITE;

/// Secondary text (artist line)
pub const TEXT_DIM: Color32 = Color32::from_rgb(0xb0, 0xb0, 0xb0);

/// Glyph color on the chips
pub const GLYPH: Color32 = Color32::WHITE;

// === Metrics ===
pub const HEADER_PADDING: f32 = 12.0;
pub const GRID_PADDING: f32 = 10.0;
pub const CHIP_SPACING: f32 = 12.0;
pub const CHIP_ROUNDING: f32 = 6.0;

pub fn title_font() -> FontId {
    FontId::new(26.0, FontFamily::Proportional)
}

pub fn artist_font() -> FontId {
    FontId::new(15.0, FontFamily::Proportional)
}
