//! Label above a framed body, shared by every field widget.

use crate::gui::theme::AppTheme;
use eframe::egui::{self, InnerResponse, RichText, Ui};

pub struct FieldBase<'a> {
    label: &'a str,
    disabled: bool,
    error: bool,
}

impl<'a> FieldBase<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            disabled: false,
            error: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Red border around the body
    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// Render the label and the framed body; the body is laid out horizontally
    pub fn show<R>(
        self,
        ui: &mut Ui,
        theme: &AppTheme,
        add_body: impl FnOnce(&mut Ui) -> R,
    ) -> InnerResponse<R> {
        ui.vertical(|ui| {
            if !self.label.is_empty() {
                ui.label(RichText::new(self.label).small().color(theme.text_secondary));
            }
            let mut frame = theme.frame_field();
            if self.disabled {
                frame = frame.fill(theme.background);
            }
            if self.error {
                frame = frame.stroke(egui::Stroke::new(1.5, theme.danger));
            }
            frame
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.horizontal(add_body).inner
                })
                .inner
        })
    }
}
