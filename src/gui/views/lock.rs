//! Lock screen shown at start-up when an app PIN is configured.

use crate::gui::app::GuiApp;
use crate::gui::widgets::PinCodeField;
use crate::pin_code::{PinCode, PinEvent};
use eframe::egui::{self, RichText};

#[derive(Default)]
pub struct LockState {
    pub pin: PinCode,
    /// The last complete PIN was wrong
    pub invalid: bool,
}

impl GuiApp {
    pub(crate) fn view_lock(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing_xl * 2.0);
            ui.heading(RichText::new("Enter your PIN").strong());
            ui.add_space(self.theme.spacing_md);

            let response = PinCodeField::new(&mut self.lock_state.pin, "unlock_pin")
                .valid(!self.lock_state.invalid)
                .auto_focus(true)
                .show(ui, &self.theme);

            match response.event {
                Some(PinEvent::Completed(pin)) => {
                    if self.user_settings.verify_pin(&pin) {
                        tracing::info!("App unlocked");
                        self.lock_state = LockState::default();
                        self.unlock();
                    } else {
                        tracing::warn!("Wrong PIN entered");
                        self.lock_state.invalid = true;
                    }
                }
                Some(PinEvent::Changed) | Some(PinEvent::Cleared) => self.lock_state.invalid = false,
                None => {}
            }

            ui.add_space(self.theme.spacing_sm);
            if self.lock_state.invalid {
                ui.label(RichText::new("Wrong PIN, click the cells to try again").color(self.theme.danger));
            }
        });
    }
}
