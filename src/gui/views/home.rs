//! Home screen: the Crypto tab with the portfolio and the Staking tab.

use crate::gui::app::GuiApp;
use crate::gui::helpers::{change_percent_text, paint_network_logo, HIDDEN_BALANCE};
use crate::gui::notifications::push_notification;
use crate::gui::widgets::{AddressField, BalanceField, NetworkField, SummaryAction, TokenSummaryBlock};
use crate::portfolio::{PortfolioSummary, TokenBalance};
use crate::resolvers::NetworkResolver;
use crate::types::{HomeTab, StakingPosition};
use crate::utils::format_fiat;
use eframe::egui::{self, RichText};

impl GuiApp {
    pub(crate) fn view_home(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in [HomeTab::Crypto, HomeTab::Staking] {
                let selected = self.home_tab == tab;
                let text = RichText::new(tab.title()).size(18.0);
                let text = if selected {
                    text.strong().color(self.theme.primary)
                } else {
                    text.color(self.theme.text_secondary)
                };
                if ui.selectable_label(selected, text).clicked() {
                    self.home_tab = tab;
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let loading = self.portfolio_job.is_some();
                if loading {
                    ui.spinner();
                } else if ui.add(self.theme.button_small("Refresh")).clicked() {
                    self.refresh_portfolio();
                }
            });
        });
        if let Some(error) = &self.portfolio_error {
            ui.label(RichText::new(error).color(self.theme.danger));
        }
        ui.add_space(self.theme.spacing_md);

        match self.home_tab {
            HomeTab::Crypto => self.render_crypto_tab(ui),
            HomeTab::Staking => self.render_staking_tab(ui),
        }
    }

    fn render_crypto_tab(&mut self, ui: &mut egui::Ui) {
        let summary = PortfolioSummary::from_tokens(&self.portfolio.tokens);
        let ctx = ui.ctx().clone();
        let account = self.config.account.clone();
        let action = TokenSummaryBlock::new(summary)
            .balances_hidden(self.user_settings.balances_hidden)
            .on_receive(move || ctx.output_mut(|o| o.copied_text = account.clone()))
            .show(ui, &self.theme);
        match action {
            Some(SummaryAction::Receive) => {
                push_notification(&mut self.notifications, "Address copied to clipboard");
            }
            Some(other) => tracing::info!("{} is not available for this account", other.title()),
            None => {}
        }

        ui.add_space(self.theme.spacing_md);
        if self.portfolio.tokens.is_empty() && self.portfolio_job.is_none() {
            ui.label(RichText::new("No tokens").color(self.theme.text_secondary));
        }
        for token in &self.portfolio.tokens {
            self.render_token_row(ui, token);
            ui.add_space(self.theme.spacing_xs);
        }
    }

    fn render_token_row(&self, ui: &mut egui::Ui, token: &TokenBalance) {
        let hidden = self.user_settings.balances_hidden;
        self.theme.frame_card().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                paint_network_logo(ui, &self.networks.logo(&token.network_key), self.theme.icon_size);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&token.symbol).strong());
                    ui.label(
                        RichText::new(self.networks.display_name(&token.network_key))
                            .small()
                            .color(self.theme.text_secondary),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.vertical(|ui| {
                        let (amount, value) = if hidden {
                            (HIDDEN_BALANCE.to_string(), HIDDEN_BALANCE.to_string())
                        } else {
                            (
                                format!("{} {}", token.balance, token.symbol),
                                format!("${}", format_fiat(token.value_usd())),
                            )
                        };
                        ui.label(RichText::new(amount).strong());
                        ui.horizontal(|ui| {
                            let decrease = token.change_24h_percent < 0.0;
                            ui.label(
                                RichText::new(change_percent_text(token.change_24h_percent, decrease))
                                    .small()
                                    .color(if decrease { self.theme.danger } else { self.theme.success }),
                            );
                            ui.label(RichText::new(value).small().color(self.theme.text_secondary));
                        });
                    });
                });
            });
        });
    }

    fn render_staking_tab(&mut self, ui: &mut egui::Ui) {
        let network_key = self.config.network_key.clone();
        let positions: Vec<StakingPosition> = self
            .portfolio
            .positions
            .iter()
            .filter(|p| p.network_key == network_key)
            .cloned()
            .collect();

        if positions.is_empty() {
            if self.portfolio_job.is_none() {
                ui.label(
                    RichText::new(format!(
                        "No staking positions on {}",
                        self.networks.display_name(&network_key)
                    ))
                    .color(self.theme.text_secondary),
                );
            }
            return;
        }

        for position in positions {
            let token = self
                .networks
                .native_token(&position.network_key)
                .unwrap_or_else(|| crate::withdraw_flow::FALLBACK_TOKEN.to_string());
            let mut withdraw_clicked = false;
            self.theme.frame_card().show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                NetworkField::new(&position.network_key, "Network").show(ui, &self.theme, &self.networks);
                if let Some(validator) = &position.validator {
                    AddressField::new(validator, "Validator").show(ui, &self.theme, &self.avatars);
                }
                BalanceField::new(&position.unlocking_amount, &token, "Unlocked")
                    .hidden(self.user_settings.balances_hidden)
                    .show(ui, &self.theme);
                ui.add_space(self.theme.spacing_sm);
                let label = if position.next_withdrawal_action.as_str() == "redeem" {
                    "Redeem"
                } else {
                    "Withdraw"
                };
                withdraw_clicked = ui.add(self.theme.button_primary(label)).clicked();
            });
            if withdraw_clicked {
                self.open_withdrawal(&position);
            }
            ui.add_space(self.theme.spacing_sm);
        }
    }
}
