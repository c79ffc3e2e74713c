//! Address with identicon, abbreviated to its first and last ten characters.

use super::field_base::FieldBase;
use crate::gui::helpers::paint_identicon;
use crate::gui::theme::AppTheme;
use crate::resolvers::AvatarResolver;
use crate::utils::to_short;
use eframe::egui::{self, RichText, Ui};

pub const ADDRESS_PREFIX_LEN: usize = 10;
pub const ADDRESS_SUFFIX_LEN: usize = 10;

/// Text shown for `address`: `15oF4uVJwm…bjMNHr6Sp5`
pub fn display_address(address: &str) -> String {
    to_short(address, ADDRESS_PREFIX_LEN, ADDRESS_SUFFIX_LEN)
}

pub struct AddressField<'a> {
    address: &'a str,
    label: &'a str,
    show_right_icon: bool,
}

pub struct AddressFieldResponse {
    pub response: egui::Response,
    /// The trailing info icon was clicked (the address is copied as well)
    pub info_clicked: bool,
}

impl<'a> AddressField<'a> {
    pub fn new(address: &'a str, label: &'a str) -> Self {
        Self {
            address,
            label,
            show_right_icon: false,
        }
    }

    pub fn show_right_icon(mut self, show: bool) -> Self {
        self.show_right_icon = show;
        self
    }

    pub fn show(
        self,
        ui: &mut Ui,
        theme: &AppTheme,
        avatars: &dyn AvatarResolver,
    ) -> AddressFieldResponse {
        let mut info_clicked = false;
        let inner = FieldBase::new(self.label).show(ui, theme, |ui| {
            paint_identicon(ui, &avatars.avatar(self.address), theme.icon_size);
            ui.label(
                RichText::new(display_address(self.address))
                    .monospace()
                    .color(theme.text_primary),
            )
            .on_hover_text(self.address);

            if self.show_right_icon {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let info = ui
                        .add(egui::Button::new(RichText::new("ℹ").color(theme.text_secondary)).frame(false))
                        .on_hover_text("Copy address");
                    if info.clicked() {
                        ui.output_mut(|o| o.copied_text = self.address.to_string());
                        info_clicked = true;
                    }
                });
            }
        });
        AddressFieldResponse {
            response: inner.response,
            info_clicked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::widgets::test_support::render;
    use crate::resolvers::HashIdenticons;

    // ==================== display_address tests ====================

    #[test]
    fn test_display_address_abbreviates_long_addresses() {
        let address = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
        assert_eq!(display_address(address), "5GrwvaEF5z…cNoHGKutQY");
    }

    #[test]
    fn test_display_address_short_text_untouched() {
        assert_eq!(display_address("alice"), "alice");
        assert_eq!(display_address("0123456789abcdefghi"), "0123456789abcdefghi");
    }

    // ==================== render tests ====================

    #[test]
    fn test_address_field_renders_without_click() {
        let theme = AppTheme::default();
        render(|ui| {
            let resp = AddressField::new("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5", "Account")
                .show_right_icon(true)
                .show(ui, &theme, &HashIdenticons);
            assert!(!resp.info_clicked);
        });
    }
}
