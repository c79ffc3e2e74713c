//! Helper functions and constants for the GUI
//!
//! Summary text formatting, identicon and logo painting, and the window icon.

use crate::resolvers::{AvatarResolver, HashIdenticons, Identicon, NetworkLogo, IDENTICON_SIZE};
use crate::utils::format_fiat;
use eframe::egui;

/// Shown instead of amounts while balances are hidden
pub const HIDDEN_BALANCE: &str = "******";

pub fn color(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// "$12,345.67", or asterisks while balances are hidden
pub fn total_value_text(value: f64, hidden: bool) -> String {
    if hidden {
        HIDDEN_BALANCE.to_string()
    } else {
        format!("${}", format_fiat(value))
    }
}

/// "- $12.34" / "+ $12.34"
pub fn change_value_text(value: f64, is_decrease: bool) -> String {
    let prefix = if is_decrease { "- $" } else { "+ $" };
    format!("{}{}", prefix, format_fiat(value))
}

/// "-1.25%" / "+1.25%"
pub fn change_percent_text(percent: f64, is_decrease: bool) -> String {
    let sign = if is_decrease { "-" } else { "+" };
    format!("{}{:.2}%", sign, percent.abs())
}

/// Paint an identicon into a `size` square and return its response
pub fn paint_identicon(ui: &mut egui::Ui, identicon: &Identicon, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter_at(rect);
        painter.circle_filled(rect.center(), size / 2.0, color(identicon.background));

        // cells live in the square inscribed in the circle
        let inner = size / std::f32::consts::SQRT_2;
        let cell = inner / IDENTICON_SIZE as f32;
        let origin = rect.center() - egui::vec2(inner / 2.0, inner / 2.0);
        for (row, cells) in identicon.cells.iter().enumerate() {
            for (col, filled) in cells.iter().enumerate() {
                if *filled {
                    let min = origin + egui::vec2(col as f32 * cell, row as f32 * cell);
                    painter.rect_filled(
                        egui::Rect::from_min_size(min, egui::vec2(cell, cell)),
                        0.0,
                        color(identicon.color),
                    );
                }
            }
        }
    }
    response
}

/// Paint a round network badge with the chain's initial
pub fn paint_network_logo(ui: &mut egui::Ui, logo: &NetworkLogo, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter_at(rect);
        painter.circle_filled(rect.center(), size / 2.0, color(logo.color));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            logo.initial,
            egui::FontId::proportional(size * 0.55),
            egui::Color32::WHITE,
        );
    }
    response
}

/// Window icon: the identicon of the app name, scaled up
pub fn load_icon() -> egui::IconData {
    const SCALE: usize = 12;
    let side = IDENTICON_SIZE * SCALE;
    let identicon = HashIdenticons.avatar(env!("CARGO_PKG_NAME"));

    let mut rgba = Vec::with_capacity(side * side * 4);
    for y in 0..side {
        for x in 0..side {
            let rgb = if identicon.cells[y / SCALE][x / SCALE] {
                identicon.color
            } else {
                identicon.background
            };
            rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }
    egui::IconData {
        rgba,
        width: side as u32,
        height: side as u32,
    }
}
