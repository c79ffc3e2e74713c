//! Settings view implementation
//!
//! Contains the settings panel rendering including:
//! - Display preferences (hidden balances, start tab)
//! - Network selection and display names
//! - App PIN
//! - Storage locations and the operation log

use crate::gui::app::GuiApp;
use crate::gui::notifications::push_notification;
use crate::gui::widgets::{NetworkField, PinCodeField};
use crate::operation_log;
use crate::pin_code::{PinCode, PinEvent};
use crate::resolvers::NetworkResolver;
use crate::types::HomeTab;
use crate::user_settings::UserSettings;
use eframe::egui::{self, RichText};

/// Steps of setting a new PIN
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PinSetup {
    #[default]
    Idle,
    Enter,
    /// First entry done, waiting for the same PIN again
    Confirm(String),
}

#[derive(Default)]
pub struct SettingsState {
    pub pin_setup: PinSetup,
    pub pin: PinCode,
    pub pin_mismatch: bool,
    pub network_name: String,
    pub log_content: Option<String>,
}

impl SettingsState {
    /// Advance the PIN setup with a completed entry.
    ///
    /// Returns the new PIN once it was entered twice.
    pub fn pin_completed(&mut self, pin: String) -> Option<String> {
        match std::mem::take(&mut self.pin_setup) {
            PinSetup::Idle => None,
            PinSetup::Enter => {
                self.pin_setup = PinSetup::Confirm(pin);
                self.pin = PinCode::new();
                self.pin_mismatch = false;
                None
            }
            PinSetup::Confirm(first) if first == pin => {
                self.pin = PinCode::new();
                self.pin_mismatch = false;
                Some(pin)
            }
            PinSetup::Confirm(_) => {
                self.pin_setup = PinSetup::Enter;
                self.pin = PinCode::new();
                self.pin_mismatch = true;
                None
            }
        }
    }
}

impl GuiApp {
    /// Render the settings view
    pub(crate) fn view_settings(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.add(self.theme.button_small("← Back")).clicked() {
                self.navigate_home(self.home_tab);
            }
            ui.heading(RichText::new("Settings").strong());
        });
        ui.add_space(self.theme.spacing_md);

        self.render_display_settings(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_network_settings(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_pin_settings(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_storage_settings(ui);
    }

    fn render_display_settings(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        self.theme.frame_card().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Display").strong());
            ui.add_space(self.theme.spacing_xs);
            changed |= ui
                .checkbox(&mut self.user_settings.balances_hidden, "Hide balances")
                .changed();
            ui.horizontal(|ui| {
                ui.label("Start on tab:");
                egui::ComboBox::from_id_source("default_home_tab")
                    .selected_text(self.user_settings.default_home_tab.title())
                    .show_ui(ui, |ui| {
                        for tab in [HomeTab::Crypto, HomeTab::Staking] {
                            changed |= ui
                                .selectable_value(&mut self.user_settings.default_home_tab, tab, tab.title())
                                .changed();
                        }
                    });
            });
        });
        if changed {
            self.save_settings();
        }
    }

    fn render_network_settings(&mut self, ui: &mut egui::Ui) {
        let keys: Vec<String> = crate::config::NETWORKS.iter().map(|n| n.key.to_string()).collect();
        let mut selected = None;
        let mut rename = None;
        self.theme.frame_card().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Network").strong());
            ui.add_space(self.theme.spacing_xs);
            selected = NetworkField::new(&self.config.network_key, "Selected network")
                .selectable(&keys)
                .show(ui, &self.theme, &self.networks)
                .selected;

            ui.add_space(self.theme.spacing_sm);
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings_state.network_name)
                        .hint_text(self.networks.display_name(&self.config.network_key))
                        .desired_width(200.0),
                );
                if ui.add(self.theme.button_small("Rename")).clicked() {
                    rename = Some(self.settings_state.network_name.trim().to_string());
                }
                if self.user_settings.network_names.contains_key(&self.config.network_key)
                    && ui.add(self.theme.button_small("Reset name")).clicked()
                {
                    rename = Some(String::new());
                }
            });
        });

        if let Some(key) = selected {
            self.select_network(&key);
        }
        if let Some(name) = rename {
            let key = self.config.network_key.clone();
            self.user_settings.set_network_name(&key, &name);
            self.networks = self.user_settings.network_registry();
            self.settings_state.network_name.clear();
            self.save_settings();
        }
    }

    fn render_pin_settings(&mut self, ui: &mut egui::Ui) {
        let mut new_pin = None;
        let mut clear_pin = false;
        self.theme.frame_card().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("App PIN").strong());
            ui.add_space(self.theme.spacing_xs);

            match self.settings_state.pin_setup.clone() {
                PinSetup::Idle => {
                    ui.horizontal(|ui| {
                        let label = if self.user_settings.has_pin() { "Change PIN" } else { "Set PIN" };
                        if ui.add(self.theme.button_secondary(label)).clicked() {
                            self.settings_state.pin_setup = PinSetup::Enter;
                            self.settings_state.pin = PinCode::new();
                        }
                        if self.user_settings.has_pin()
                            && ui.add(self.theme.button_danger("Remove PIN")).clicked()
                        {
                            clear_pin = true;
                        }
                    });
                }
                stage => {
                    let prompt = if stage == PinSetup::Enter { "Enter a new PIN" } else { "Repeat the PIN" };
                    ui.label(prompt);
                    let response = PinCodeField::new(&mut self.settings_state.pin, "settings_pin")
                        .valid(!self.settings_state.pin_mismatch)
                        .auto_focus(true)
                        .show(ui, &self.theme);
                    match response.event {
                        Some(PinEvent::Completed(pin)) => new_pin = self.settings_state.pin_completed(pin),
                        Some(_) => self.settings_state.pin_mismatch = false,
                        None => {}
                    }
                    if self.settings_state.pin_mismatch {
                        ui.label(RichText::new("PINs did not match").color(self.theme.danger));
                    }
                    if ui.add(self.theme.button_small("Cancel")).clicked() {
                        self.settings_state.pin_setup = PinSetup::Idle;
                        self.settings_state.pin = PinCode::new();
                        self.settings_state.pin_mismatch = false;
                    }
                }
            }
        });

        if let Some(pin) = new_pin {
            match self.user_settings.set_pin(&pin) {
                Ok(()) => {
                    self.save_settings();
                    push_notification(&mut self.notifications, "PIN updated");
                }
                Err(e) => {
                    tracing::error!("{:#}", e);
                    push_notification(&mut self.notifications, "Failed to set PIN");
                }
            }
        }
        if clear_pin {
            self.user_settings.clear_pin();
            self.save_settings();
            push_notification(&mut self.notifications, "PIN removed");
        }
    }

    fn render_storage_settings(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_card().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Storage").strong());
            ui.add_space(self.theme.spacing_xs);
            ui.label(
                RichText::new(format!("Settings: {}", UserSettings::settings_path_display()))
                    .small()
                    .color(self.theme.text_secondary),
            );
            ui.label(
                RichText::new(format!("Operation log: {}", operation_log::log_file_path()))
                    .small()
                    .color(self.theme.text_secondary),
            );
            ui.add_space(self.theme.spacing_sm);

            if ui.add(self.theme.button_small("Load operation log")).clicked() {
                self.settings_state.log_content = Some(match operation_log::read_log() {
                    Ok(content) if content.is_empty() => "No withdrawals logged yet.".to_string(),
                    Ok(content) => content,
                    Err(e) => format!("Failed to read log: {}", e),
                });
            }
            if let Some(content) = &self.settings_state.log_content {
                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(content).monospace().small());
                    });
            }
        });
    }
}
