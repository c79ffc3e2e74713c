//! Network name and logo, optionally expandable into a network selector.

use super::field_base::FieldBase;
use crate::gui::helpers::paint_network_logo;
use crate::gui::theme::AppTheme;
use crate::resolvers::NetworkResolver;
use eframe::egui::{self, RichText, Ui};

pub struct NetworkField<'a> {
    network_key: &'a str,
    label: &'a str,
    options: Option<&'a [String]>,
}

pub struct NetworkFieldResponse {
    pub response: egui::Response,
    /// Key picked from the selector this frame
    pub selected: Option<String>,
}

impl<'a> NetworkField<'a> {
    pub fn new(network_key: &'a str, label: &'a str) -> Self {
        Self {
            network_key,
            label,
            options: None,
        }
    }

    /// Make the field a selector over `keys`
    pub fn selectable(mut self, keys: &'a [String]) -> Self {
        self.options = Some(keys);
        self
    }

    pub fn show(
        self,
        ui: &mut Ui,
        theme: &AppTheme,
        networks: &dyn NetworkResolver,
    ) -> NetworkFieldResponse {
        let open_id = ui.make_persistent_id(("network_field", self.label));
        let mut open = ui.data(|d| d.get_temp::<bool>(open_id)).unwrap_or(false);

        let inner = FieldBase::new(self.label).show(ui, theme, |ui| {
            paint_network_logo(ui, &networks.logo(self.network_key), theme.icon_size);
            ui.label(
                RichText::new(networks.display_name(self.network_key))
                    .strong()
                    .color(theme.text_primary),
            );
            if self.options.is_some() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(if open { "⏶" } else { "⏷" }).color(theme.text_secondary));
                });
            }
        });

        let mut response = inner.response;
        let mut selected = None;
        if let Some(keys) = self.options {
            response = response.interact(egui::Sense::click());
            if response.clicked() {
                open = !open;
            }
            if open {
                theme.frame_card().show(ui, |ui| {
                    for key in keys {
                        ui.horizontal(|ui| {
                            paint_network_logo(ui, &networks.logo(key), theme.icon_size * 0.7);
                            let is_current = key == self.network_key;
                            if ui
                                .selectable_label(is_current, networks.display_name(key))
                                .clicked()
                            {
                                if !is_current {
                                    selected = Some(key.clone());
                                }
                                open = false;
                            }
                        });
                    }
                });
            }
            ui.data_mut(|d| d.insert_temp(open_id, open));
        }

        NetworkFieldResponse { response, selected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::widgets::test_support::render;
    use crate::resolvers::NetworkRegistry;

    // ==================== render tests ====================

    #[test]
    fn test_network_field_renders_unknown_key() {
        let theme = AppTheme::default();
        let registry = NetworkRegistry::builtin();
        render(|ui| {
            let resp = NetworkField::new("not-a-chain", "Network").show(ui, &theme, &registry);
            assert!(resp.selected.is_none());
        });
    }

    #[test]
    fn test_network_selector_closed_by_default() {
        let theme = AppTheme::default();
        let registry = NetworkRegistry::builtin();
        let keys = vec!["polkadot".to_string(), "kusama".to_string()];
        render(|ui| {
            let resp = NetworkField::new("polkadot", "Network")
                .selectable(&keys)
                .show(ui, &theme, &registry);
            assert!(resp.selected.is_none());
            assert!(!resp.response.clicked());
        });
    }
}
