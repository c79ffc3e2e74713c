//! Portfolio total, 24h change and the receive/send/buy triggers.

use crate::gui::helpers::{change_percent_text, change_value_text, total_value_text};
use crate::gui::theme::AppTheme;
use crate::portfolio::PortfolioSummary;
use eframe::egui::{RichText, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    Receive,
    Send,
    Buy,
}

impl SummaryAction {
    pub fn title(self) -> &'static str {
        match self {
            Self::Receive => "Receive",
            Self::Send => "Send",
            Self::Buy => "Buy",
        }
    }
}

type Callback<'a> = Box<dyn FnMut() + 'a>;

/// Pure display block; every action is delegated to the caller.
pub struct TokenSummaryBlock<'a> {
    summary: PortfolioSummary,
    balances_hidden: bool,
    on_receive: Option<Callback<'a>>,
    on_send: Option<Callback<'a>>,
    on_buy: Option<Callback<'a>>,
}

impl<'a> TokenSummaryBlock<'a> {
    pub fn new(summary: PortfolioSummary) -> Self {
        Self {
            summary,
            balances_hidden: false,
            on_receive: None,
            on_send: None,
            on_buy: None,
        }
    }

    pub fn balances_hidden(mut self, hidden: bool) -> Self {
        self.balances_hidden = hidden;
        self
    }

    pub fn on_receive(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_receive = Some(Box::new(callback));
        self
    }

    pub fn on_send(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_send = Some(Box::new(callback));
        self
    }

    pub fn on_buy(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_buy = Some(Box::new(callback));
        self
    }

    /// Render the block. Returns the triggered action, if any.
    pub fn show(mut self, ui: &mut Ui, theme: &AppTheme) -> Option<SummaryAction> {
        let mut clicked = None;
        let summary = self.summary;
        let change_color = if summary.is_price_decrease {
            theme.danger
        } else {
            theme.success
        };

        theme.frame_card().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Total balance").color(theme.text_secondary));
                ui.label(
                    RichText::new(total_value_text(summary.total_value, self.balances_hidden))
                        .size(32.0)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.label(
                    RichText::new(format!(
                        "{}  {}",
                        change_value_text(summary.total_change_value, summary.is_price_decrease),
                        change_percent_text(summary.total_change_percent, summary.is_price_decrease)
                    ))
                    .color(change_color),
                );

                ui.add_space(theme.spacing_md);
                ui.columns(3, |columns| {
                    for (column, action) in columns
                        .iter_mut()
                        .zip([SummaryAction::Receive, SummaryAction::Send, SummaryAction::Buy])
                    {
                        column.vertical_centered(|ui| {
                            if ui.add(theme.button_secondary(action.title())).clicked() {
                                clicked = Some(action);
                            }
                        });
                    }
                });
            });
        });

        if let Some(action) = clicked {
            let callback = match action {
                SummaryAction::Receive => self.on_receive.as_mut(),
                SummaryAction::Send => self.on_send.as_mut(),
                SummaryAction::Buy => self.on_buy.as_mut(),
            };
            if let Some(callback) = callback {
                callback();
            }
        }
        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::widgets::test_support::render;

    #[test]
    fn test_block_renders_without_callbacks() {
        let theme = AppTheme::default();
        let summary = PortfolioSummary {
            total_value: 1234.5,
            total_change_value: 12.0,
            total_change_percent: 1.0,
            is_price_decrease: true,
        };
        render(|ui| {
            let action = TokenSummaryBlock::new(summary).balances_hidden(true).show(ui, &theme);
            assert!(action.is_none());
        });
    }

    #[test]
    fn test_action_titles() {
        assert_eq!(SummaryAction::Receive.title(), "Receive");
        assert_eq!(SummaryAction::Send.title(), "Send");
        assert_eq!(SummaryAction::Buy.title(), "Buy");
    }
}
