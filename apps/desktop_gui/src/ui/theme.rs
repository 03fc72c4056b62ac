//! Light clinical palette shared by the analyzer panels and widgets.

use egui::{Color32, CornerRadius, Stroke};

pub const PANEL_RADIUS: u8 = 10;

pub const TEXT_STRONG: Color32 = Color32::from_rgb(17, 24, 39);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);
pub const TEXT_FAINT: Color32 = Color32::from_rgb(156, 163, 175);
pub const CARD_FILL: Color32 = Color32::from_rgb(255, 255, 255);
pub const CARD_BORDER: Color32 = Color32::from_rgb(229, 231, 235);
pub const APP_BACKGROUND: Color32 = Color32::from_rgb(240, 246, 255);
pub const ACCENT: Color32 = Color32::from_rgb(79, 70, 229);
pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);

pub const TAG_FILL: Color32 = Color32::from_rgb(243, 244, 246);
pub const TAG_TEXT: Color32 = Color32::from_rgb(55, 65, 81);

pub const PRESENT_FILL: Color32 = Color32::from_rgb(236, 253, 245);
pub const PRESENT_TEXT: Color32 = Color32::from_rgb(4, 120, 87);
pub const PRESENT_BORDER: Color32 = Color32::from_rgb(167, 243, 208);
pub const NOT_PRESENT_FILL: Color32 = Color32::from_rgb(249, 250, 251);
pub const NOT_PRESENT_TEXT: Color32 = Color32::from_rgb(75, 85, 99);
pub const NOT_PRESENT_BORDER: Color32 = Color32::from_rgb(229, 231, 235);

pub const CODE_FILL: Color32 = Color32::from_rgb(239, 246, 255);
pub const CODE_TEXT: Color32 = Color32::from_rgb(30, 64, 175);
pub const CODE_BORDER: Color32 = Color32::from_rgb(191, 219, 254);

pub fn card_stroke() -> Stroke {
    Stroke::new(1.0, CARD_BORDER)
}

pub fn analyzer_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = APP_BACKGROUND;
    visuals.window_fill = CARD_FILL;
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.window_corner_radius = CornerRadius::same(PANEL_RADIUS);
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.85);
    visuals
}
