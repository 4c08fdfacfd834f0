//! Centralized theme constants for Jotter's update dialog
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0c, 0x0a, 0x09); // stone-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x1c, 0x19, 0x17); // stone-900
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x29, 0x25, 0x24); // stone-800
pub const BG_HOVER: Color32 = Color32::from_rgb(0x1e, 0x1b, 0x2e); // faint indigo hover
pub const BG_MODAL: Color32 = Color32::from_rgb(0x14, 0x12, 0x11);

// =============================================================================
// COLORS - Accent (Indigo)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x81, 0x8c, 0xf8); // indigo-400

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe7, 0xe5, 0xe4); // stone-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa8, 0xa2, 0x9e); // stone-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x78, 0x71, 0x6c); // stone-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x29, 0x25, 0x24); // stone-800

// =============================================================================
// COLORS - Errors
// =============================================================================
pub const ERROR_FILL: Color32 = Color32::from_rgb(0x2d, 0x0a, 0x0a);
pub const ERROR_BORDER: Color32 = Color32::from_rgb(0x7f, 0x1d, 0x1d);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xfc, 0xa5, 0xa5);

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x44, 0x40, 0x3c); // stone-700
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x81, 0x8c, 0xf8); // indigo-400
pub const BTN_ACCENT_TEXT: Color32 = Color32::from_rgb(0x1e, 0x1b, 0x4b); // indigo-950

// =============================================================================
// SIZES - Fonts
// =============================================================================
pub const FONT_TITLE: f32 = 20.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 12.0;

// =============================================================================
// SIZES - Layout
// =============================================================================
pub const DIALOG_WIDTH: f32 = 460.0;
pub const NOTES_MAX_HEIGHT: f32 = 260.0;
pub const BUTTON_HEIGHT: f32 = 28.0;

// =============================================================================
// SIZES - Rounding / stroke / spacing
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    let widget = |bg_fill: Color32,
                  weak_bg_fill: Color32,
                  bg_stroke: egui::Stroke,
                  fg_stroke: egui::Stroke,
                  expansion: f32| egui::style::WidgetVisuals {
        bg_fill,
        weak_bg_fill,
        bg_stroke,
        fg_stroke,
        corner_radius: RADIUS_DEFAULT.into(),
        expansion,
    };

    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_MODAL,
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        widgets: egui::style::Widgets {
            noninteractive: widget(
                BG_ELEVATED,
                BG_SURFACE,
                egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                0.0,
            ),
            inactive: widget(
                Color32::TRANSPARENT,
                BG_ELEVATED,
                egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY),
                0.0,
            ),
            hovered: widget(
                BG_HOVER,
                Color32::from_rgb(0x33, 0x2f, 0x2c),
                egui::Stroke::NONE,
                egui::Stroke::new(STROKE_MEDIUM, TEXT_PRIMARY),
                0.0,
            ),
            active: widget(
                BG_SURFACE,
                BG_SURFACE,
                egui::Stroke::NONE,
                egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                -2.0,
            ),
            open: widget(
                BG_SURFACE,
                BG_ELEVATED,
                egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                0.0,
            ),
        },
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_MODAL)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL)
}

pub fn notes_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

pub fn error_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(ERROR_FILL)
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(10))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, ERROR_BORDER))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
}

/// Accent button for the dialog's default action
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(BTN_ACCENT_TEXT))
        .fill(BTN_ACCENT)
        .corner_radius(RADIUS_DEFAULT)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
}
