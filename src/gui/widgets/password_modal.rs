//! Password prompt shown before a transaction is signed.

use crate::gui::theme::AppTheme;
use eframe::egui::{self, RichText};
use zeroize::Zeroize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordModalResponse {
    /// Still open, nothing happened
    None,
    /// The password text changed
    Edited,
    /// Confirm pressed (or Enter). The caller should zeroize the password once used.
    Confirmed(String),
    Canceled,
}

#[derive(Default)]
pub struct PasswordModal {
    password: String,
    show_password: bool,
}

impl PasswordModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wipe the typed password
    pub fn clear(&mut self) {
        self.password.zeroize();
        self.show_password = false;
    }

    pub fn has_input(&self) -> bool {
        !self.password.is_empty()
    }

    /// Show the modal window.
    ///
    /// While `busy` the inputs are disabled and a spinner replaces the
    /// confirm button; `error` is printed under the password input.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: &AppTheme,
        title: &str,
        error: Option<&str>,
        busy: bool,
    ) -> PasswordModalResponse {
        let mut result = PasswordModalResponse::None;
        let mut is_open = true;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut is_open)
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                ui.add_space(theme.spacing_sm);
                ui.label(RichText::new("Enter your password to sign the transaction").color(theme.text_secondary));
                ui.add_space(theme.spacing_sm);

                ui.add_enabled_ui(!busy, |ui| {
                    ui.horizontal(|ui| {
                        let input = ui.add(
                            egui::TextEdit::singleline(&mut self.password)
                                .password(!self.show_password)
                                .hint_text("Password")
                                .desired_width(240.0),
                        );
                        if input.changed() {
                            result = PasswordModalResponse::Edited;
                        }
                        if input.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter))
                            && self.has_input()
                        {
                            result = PasswordModalResponse::Confirmed(self.password.clone());
                        }
                        ui.checkbox(&mut self.show_password, "Show");
                    });
                });

                if let Some(error) = error {
                    ui.add_space(theme.spacing_xs);
                    ui.label(RichText::new(error).color(theme.danger));
                }

                ui.add_space(theme.spacing_md);
                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if busy {
                            ui.spinner();
                            ui.label(RichText::new("Submitting…").color(theme.text_secondary));
                        } else if ui
                            .add_enabled(self.has_input(), theme.button_primary("Confirm"))
                            .clicked()
                        {
                            result = PasswordModalResponse::Confirmed(self.password.clone());
                        }
                        if ui
                            .add_enabled(!busy, theme.button_secondary("Cancel"))
                            .clicked()
                        {
                            result = PasswordModalResponse::Canceled;
                        }
                    });
                });
            });

        // Closing via the title bar counts as cancel, unless a submission is running
        if !is_open && !busy && result == PasswordModalResponse::None {
            result = PasswordModalResponse::Canceled;
        }
        if matches!(result, PasswordModalResponse::Confirmed(_) | PasswordModalResponse::Canceled) {
            self.clear();
        }
        result
    }
}

impl Drop for PasswordModal {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_wipes_password() {
        let mut modal = PasswordModal::new();
        modal.password.push_str("hunter2");
        modal.show_password = true;
        assert!(modal.has_input());
        modal.clear();
        assert!(!modal.has_input());
        assert!(!modal.show_password);
    }

    #[test]
    fn test_show_without_input_returns_none() {
        let ctx = egui::Context::default();
        let theme = AppTheme::default();
        let mut modal = PasswordModal::new();
        let mut response = PasswordModalResponse::Canceled;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = modal.show(ctx, &theme, "Confirm withdrawal", Some("Invalid password"), false);
        });
        assert_eq!(response, PasswordModalResponse::None);
    }
}
