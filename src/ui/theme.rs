use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Page background behind the grid and the title bar
pub const PAGE_BG: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor icons as fallback in the proportional family (edit pencil, layout toggle)
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();

    visuals.panel_fill = PAGE_BG;
    visuals.window_fill = PAGE_BG;
    visuals.faint_bg_color = Color32::from_rgb(0x24, 0x24, 0x24);
    visuals.extreme_bg_color = PAGE_BG;

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(0x2a, 0x2a, 0x2a);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(176, 176, 176));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(0x33, 0x33, 0x33);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(0x4f, 0x4f, 0x4f);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    let accent = Color32::from_rgb(19, 152, 244);
    visuals.widgets.active.bg_fill = accent;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = accent;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(32.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    ctx.set_style(style);
}

/// Colors for the timetable
pub struct GridColors {
    pub header_bg: Color32,
    pub marker_border: Color32,
    pub item_bg: Color32,
    pub text: Color32,
    pub secondary_text: Color32,
}

pub fn grid_colors() -> GridColors {
    GridColors {
        header_bg: Color32::from_rgb(0x33, 0x33, 0x33),
        marker_border: Color32::from_rgb(0x4f, 0x4f, 0x4f),
        item_bg: Color32::from_rgb(0x33, 0x33, 0x33),
        text: Color32::WHITE,
        secondary_text: Color32::from_rgb(208, 208, 200),
    }
}

/// Font sizes for labels and item text, smaller in the compact layout
pub fn grid_font_sizes(mobile: bool) -> (f32, f32) {
    // (label/header size, item name size)
    if mobile {
        (12.0, 14.0)
    } else {
        (16.0, 16.0)
    }
}
