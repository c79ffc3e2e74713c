//! Six-cell PIN input drawn over a [`PinCode`].
//!
//! The widget owns no state of its own: keyboard events are forwarded to the
//! `PinCode` and egui focus is mirrored into it every frame.

use crate::gui::theme::AppTheme;
use crate::pin_code::{CellContent, PinCode, PinEvent, CELL_COUNT, MASK_SYMBOL};
use eframe::egui::{self, Ui};

const CELL_SIZE: egui::Vec2 = egui::vec2(42.0, 52.0);
const CELL_GAP: f32 = 8.0;

pub struct PinCodeField<'a> {
    pin: &'a mut PinCode,
    id_source: &'a str,
    valid: bool,
    auto_focus: bool,
}

pub struct PinCodeFieldResponse {
    pub response: egui::Response,
    pub event: Option<PinEvent>,
}

impl<'a> PinCodeField<'a> {
    pub fn new(pin: &'a mut PinCode, id_source: &'a str) -> Self {
        Self {
            pin,
            id_source,
            valid: true,
            auto_focus: false,
        }
    }

    /// `false` draws the cells with the error colour
    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    /// Grab keyboard focus while the field is empty and nothing else has it
    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn show(self, ui: &mut Ui, theme: &AppTheme) -> PinCodeFieldResponse {
        let id = ui.make_persistent_id(("pin_code_field", self.id_source));
        let width = CELL_SIZE.x * CELL_COUNT as f32 + CELL_GAP * (CELL_COUNT - 1) as f32;
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, CELL_SIZE.y), egui::Sense::hover());
        let response = ui.interact(rect, id, egui::Sense::click());

        if response.clicked() {
            response.request_focus();
        }
        if self.auto_focus && self.pin.is_empty() && ui.memory(|m| m.focused().is_none()) {
            response.request_focus();
        }

        let mut event = None;
        let has_focus = response.has_focus();
        if has_focus && !self.pin.is_focused() {
            event = self.pin.focus();
        } else if !has_focus && self.pin.is_focused() {
            self.pin.blur();
        }

        if has_focus {
            let events = ui.input(|i| i.events.clone());
            for input in events {
                let outcome = match input {
                    egui::Event::Text(text) => {
                        let mut last = None;
                        for c in text.chars() {
                            if let Some(e) = self.pin.push(c) {
                                last = Some(e);
                            }
                        }
                        last
                    }
                    egui::Event::Paste(text) => {
                        let combined = format!("{}{}", self.pin.value(), text);
                        self.pin.set_value(&combined)
                    }
                    egui::Event::Key {
                        key: egui::Key::Backspace,
                        pressed: true,
                        ..
                    } => self.pin.backspace(),
                    _ => None,
                };
                if outcome.is_some() {
                    event = outcome;
                }
                if matches!(event, Some(PinEvent::Completed(_))) {
                    response.surrender_focus();
                    break;
                }
            }
        }

        if ui.is_rect_visible(rect) {
            paint_cells(ui, theme, self.pin, rect, self.valid);
        }

        let mut response = response;
        if event.is_some() {
            response.mark_changed();
        }
        PinCodeFieldResponse { response, event }
    }
}

fn paint_cells(ui: &Ui, theme: &AppTheme, pin: &PinCode, rect: egui::Rect, valid: bool) {
    let painter = ui.painter_at(rect);
    for cell in pin.cells() {
        let min = rect.min + egui::vec2(cell.index as f32 * (CELL_SIZE.x + CELL_GAP), 0.0);
        let cell_rect = egui::Rect::from_min_size(min, CELL_SIZE);

        let stroke = if !valid {
            egui::Stroke::new(1.5, theme.danger)
        } else if cell.focused {
            egui::Stroke::new(2.0, theme.primary)
        } else {
            egui::Stroke::new(1.0, theme.border)
        };
        painter.rect(cell_rect, theme.rounding, theme.field_fill, stroke);

        let text_color = if valid { theme.text_primary } else { theme.danger };
        let font = egui::FontId::proportional(24.0);
        match cell.content {
            CellContent::Empty => {}
            CellContent::Cursor => {
                let half = CELL_SIZE.y * 0.25;
                painter.line_segment(
                    [
                        cell_rect.center() - egui::vec2(0.0, half),
                        cell_rect.center() + egui::vec2(0.0, half),
                    ],
                    egui::Stroke::new(1.5, theme.primary),
                );
            }
            CellContent::Masked => {
                painter.text(
                    cell_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    MASK_SYMBOL,
                    font,
                    text_color,
                );
            }
            CellContent::Symbol(c) => {
                painter.text(cell_rect.center(), egui::Align2::CENTER_CENTER, c, font, text_color);
            }
        }
    }
}
