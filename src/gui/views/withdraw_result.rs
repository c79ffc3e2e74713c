//! Outcome of a submitted withdrawal

use crate::config;
use crate::gui::app::GuiApp;
use crate::gui::widgets::{AddressField, BalanceField, NetworkField, TextField};
use crate::resolvers::NetworkResolver;
use crate::types::{HomeTab, WithdrawResultParams};
use crate::utils;
use eframe::egui::{self, RichText};

/// Block explorer links shown on the result screen
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ExplorerLinks {
    pub extrinsic: Option<String>,
    pub account: Option<String>,
}

impl ExplorerLinks {
    pub(crate) fn for_result(result: &WithdrawResultParams) -> Self {
        let network_key = &result.withdraw_params.network_key;
        Self {
            extrinsic: result
                .tx_params
                .extrinsic_hash
                .as_deref()
                .and_then(|hash| config::get_extrinsic_explorer_url(network_key, hash)),
            account: config::get_account_explorer_url(
                network_key,
                &result.withdraw_params.selected_account,
            ),
        }
    }
}

fn open_url(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!("Failed to open explorer URL: {}", e);
    }
}

impl GuiApp {
    pub(crate) fn view_withdraw_result(&mut self, ui: &mut egui::Ui, result: &WithdrawResultParams) {
        let params = &result.withdraw_params;
        let tx = &result.tx_params;

        ui.vertical_centered(|ui| {
            let (icon, title, color) = if tx.tx_success {
                ("✔", "Withdrawal submitted", self.theme.success)
            } else {
                ("✖", "Withdrawal failed", self.theme.danger)
            };
            ui.label(RichText::new(icon).size(48.0).color(color));
            ui.heading(RichText::new(title).strong());
            if !tx.tx_error.is_empty() {
                ui.label(RichText::new(&tx.tx_error).color(self.theme.danger));
            }
        });
        ui.add_space(self.theme.spacing_lg);

        let token = self
            .networks
            .native_token(&params.network_key)
            .unwrap_or_else(|| crate::withdraw_flow::FALLBACK_TOKEN.to_string());
        NetworkField::new(&params.network_key, "Network").show(ui, &self.theme, &self.networks);
        let links = ExplorerLinks::for_result(result);
        AddressField::new(&params.selected_account, "Account").show(ui, &self.theme, &self.avatars);
        if let Some(url) = &links.account {
            if ui
                .add(self.theme.button_small("View account"))
                .on_hover_text(url.as_str())
                .clicked()
            {
                open_url(url);
            }
        }
        BalanceField::new(&params.withdraw_amount, &token, "Amount").show(ui, &self.theme);

        if let Some(hash) = &tx.extrinsic_hash {
            ui.horizontal(|ui| {
                TextField::new(&utils::short_hash(hash), "Extrinsic")
                    .show(ui, &self.theme)
                    .on_hover_text(hash.as_str());
            });
            ui.horizontal(|ui| {
                if ui.add(self.theme.button_small("Copy hash")).clicked() {
                    ui.output_mut(|o| o.copied_text = hash.clone());
                }
                if let Some(url) = &links.extrinsic {
                    if ui
                        .add(self.theme.button_small("View on explorer"))
                        .on_hover_text(url.as_str())
                        .clicked()
                    {
                        open_url(url);
                    }
                }
            });
        }

        ui.add_space(self.theme.spacing_lg);
        ui.vertical_centered(|ui| {
            if ui.add(self.theme.button_large("Back to staking")).clicked() {
                self.navigate_home(HomeTab::Staking);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ACCOUNT;
    use crate::types::{TxParams, WithdrawParams, WithdrawalAction};

    fn result(network_key: &str, hash: Option<&str>) -> WithdrawResultParams {
        WithdrawResultParams {
            withdraw_params: WithdrawParams {
                withdraw_amount: "5".to_string(),
                network_key: network_key.to_string(),
                selected_account: DEFAULT_ACCOUNT.to_string(),
                next_withdrawal_action: WithdrawalAction::withdraw(),
                target_validator: None,
            },
            tx_params: TxParams {
                extrinsic_hash: hash.map(str::to_string),
                tx_success: hash.is_some(),
                tx_error: String::new(),
            },
        }
    }

    // ==================== explorer link tests ====================

    #[test]
    fn test_links_for_account_and_extrinsic() {
        let links = ExplorerLinks::for_result(&result("polkadot", Some("0xabc")));
        assert_eq!(
            links.account,
            config::get_account_explorer_url("polkadot", DEFAULT_ACCOUNT)
        );
        assert!(links.account.unwrap().ends_with(DEFAULT_ACCOUNT));
        assert!(links.extrinsic.unwrap().ends_with("extrinsic/0xabc"));
    }

    #[test]
    fn test_account_link_without_hash() {
        let links = ExplorerLinks::for_result(&result("kusama", None));
        assert!(links.extrinsic.is_none());
        assert!(links.account.is_some());
    }

    #[test]
    fn test_unknown_network_has_no_links() {
        assert_eq!(
            ExplorerLinks::for_result(&result("nowhere", Some("0xabc"))),
            ExplorerLinks::default()
        );
    }
}
