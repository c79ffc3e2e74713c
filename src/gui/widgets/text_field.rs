//! Plain labelled text.

use super::field_base::FieldBase;
use crate::gui::theme::AppTheme;
use eframe::egui::{self, RichText, Ui};

pub struct TextField<'a> {
    text: &'a str,
    label: &'a str,
    disabled: bool,
}

impl<'a> TextField<'a> {
    pub fn new(text: &'a str, label: &'a str) -> Self {
        Self {
            text,
            label,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn show(self, ui: &mut Ui, theme: &AppTheme) -> egui::Response {
        let color = if self.disabled {
            theme.text_disabled
        } else {
            theme.text_primary
        };
        FieldBase::new(self.label)
            .disabled(self.disabled)
            .show(ui, theme, |ui| {
                ui.add(egui::Label::new(RichText::new(self.text).color(color)).wrap(true));
            })
            .response
    }
}
