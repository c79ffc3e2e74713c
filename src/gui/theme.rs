//! Centralized theme and styling system for the GUI
//!
//! Provides the AppTheme struct with the wallet palette, spacing, and styled
//! widget factories.

use eframe::egui;

/// Centralized theme and styling system
#[derive(Clone, Copy, Debug)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub field_fill: egui::Color32,
    pub border: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,
    pub text_disabled: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub primary_hover: egui::Color32,
    pub success: egui::Color32,
    pub danger: egui::Color32,
    pub warning: egui::Color32,

    // Spacing constants
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,
    pub spacing_xl: f32,

    pub rounding: f32,

    // Button sizes
    pub button_small: egui::Vec2,
    pub button_medium: egui::Vec2,
    pub button_large: egui::Vec2,

    /// Side of an identicon or network logo inside a field
    pub icon_size: f32,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            background: egui::Color32::from_rgb(244, 245, 249),
            surface: egui::Color32::WHITE,
            surface_hover: egui::Color32::from_rgb(236, 238, 245),
            field_fill: egui::Color32::from_rgb(248, 249, 252),
            border: egui::Color32::from_rgb(214, 218, 230),
            text_primary: egui::Color32::from_rgb(24, 28, 46),
            text_secondary: egui::Color32::from_rgb(110, 116, 138),
            text_disabled: egui::Color32::from_rgb(170, 175, 190),

            primary: egui::Color32::from_rgb(70, 84, 232),
            primary_hover: egui::Color32::from_rgb(92, 105, 245),
            success: egui::Color32::from_rgb(22, 163, 98),
            danger: egui::Color32::from_rgb(220, 53, 69),
            warning: egui::Color32::from_rgb(232, 150, 20),

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
            spacing_lg: 24.0,
            spacing_xl: 32.0,

            rounding: 8.0,

            button_small: egui::vec2(80.0, 28.0),
            button_medium: egui::vec2(140.0, 36.0),
            button_large: egui::vec2(220.0, 44.0),

            icon_size: 28.0,
        }
    }
}

impl AppTheme {
    /// Filled call-to-action button
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).strong())
            .fill(self.primary)
            .rounding(self.rounding)
            .min_size(self.button_medium)
    }

    /// Outlined button for secondary actions (cancel, back)
    pub fn button_secondary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.primary))
            .fill(self.surface)
            .stroke(egui::Stroke::new(1.5, self.primary))
            .rounding(self.rounding)
            .min_size(self.button_medium)
    }

    /// Destructive action
    pub fn button_danger(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).strong())
            .fill(self.danger)
            .rounding(self.rounding)
            .min_size(self.button_medium)
    }

    /// Create a small themed button
    pub fn button_small(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface_hover)
            .rounding(self.rounding)
            .min_size(self.button_small)
    }

    /// Full-width button at the bottom of a screen
    pub fn button_large(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).strong())
            .fill(self.primary)
            .rounding(self.rounding)
            .min_size(self.button_large)
    }

    /// Create a themed frame for cards
    pub fn frame_card(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(self.rounding * 1.5)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.border))
    }

    /// Body of a labelled field
    pub fn frame_field(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.field_fill)
            .rounding(self.rounding)
            .inner_margin(egui::Margin::symmetric(self.spacing_md, self.spacing_sm))
            .stroke(egui::Stroke::new(1.0, self.border))
    }

    /// Calculate responsive width clamped to min/max bounds
    pub fn responsive_width(ui: &egui::Ui, min: f32, preferred: f32, max: f32) -> f32 {
        let available = ui.available_width();
        available.clamp(min, max.min(preferred))
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::light();
    visuals.window_fill = theme.surface;
    visuals.panel_fill = theme.background;
    visuals.override_text_color = Some(theme.text_primary);
    visuals.window_rounding = egui::Rounding::same(theme.rounding * 1.5);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.field_fill;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_hover;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.border);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.primary_hover);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);
    visuals.selection.bg_fill = theme.primary.linear_multiply(0.25);
    visuals.selection.stroke = egui::Stroke::new(1.0, theme.primary);
    visuals.hyperlink_color = theme.primary;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(22.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(15.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(15.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::new(12.0, egui::FontFamily::Proportional),
    );

    ctx.set_style(style);
}
