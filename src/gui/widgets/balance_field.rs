//! Amount with token symbol, shifted by the token's decimals.

use super::field_base::FieldBase;
use crate::gui::helpers::HIDDEN_BALANCE;
use crate::gui::theme::AppTheme;
use crate::utils::format_balance;
use eframe::egui::{self, RichText, Ui};

/// "<formatted value> <token>"; an unparsable value is shown as given
pub fn balance_text(value: &str, decimals: u32, token: &str) -> String {
    let amount = match format_balance(value, decimals) {
        Ok(amount) => amount,
        Err(e) => {
            tracing::debug!("Showing raw balance: {}", e);
            value.trim().to_string()
        }
    };
    if token.is_empty() {
        amount
    } else {
        format!("{} {}", amount, token)
    }
}

pub struct BalanceField<'a> {
    value: &'a str,
    decimals: u32,
    token: &'a str,
    label: &'a str,
    color: Option<egui::Color32>,
    hidden: bool,
}

impl<'a> BalanceField<'a> {
    /// `value` is in display units; use [`Self::decimals`] for base units
    pub fn new(value: &'a str, token: &'a str, label: &'a str) -> Self {
        Self {
            value,
            decimals: 0,
            token,
            label,
            color: None,
            hidden: false,
        }
    }

    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn color(mut self, color: egui::Color32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn show(self, ui: &mut Ui, theme: &AppTheme) -> egui::Response {
        let text = if self.hidden {
            HIDDEN_BALANCE.to_string()
        } else {
            balance_text(self.value, self.decimals, self.token)
        };
        FieldBase::new(self.label)
            .show(ui, theme, |ui| {
                ui.label(
                    RichText::new(text)
                        .strong()
                        .color(self.color.unwrap_or(theme.text_primary)),
                );
            })
            .response
    }
}
