//! Token balances and the aggregate numbers of the home screen summary.

use crate::types::StakingPosition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub symbol: String,
    pub network_key: String,
    /// Free balance in display units
    pub balance: f64,
    pub price_usd: f64,
    /// Price change over the last 24h, in percent
    pub change_24h_percent: f64,
}

impl TokenBalance {
    pub fn value_usd(&self) -> f64 {
        self.balance * self.price_usd
    }

    /// USD change of this holding over the last 24h
    pub fn change_usd(&self) -> f64 {
        let previous_price = self.price_usd / (1.0 + self.change_24h_percent / 100.0);
        self.balance * (self.price_usd - previous_price)
    }
}

/// What the backend knows about an account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub tokens: Vec<TokenBalance>,
    pub positions: Vec<StakingPosition>,
}

/// Aggregates shown by the token summary block
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioSummary {
    pub total_value: f64,
    /// Absolute USD change, always non-negative
    pub total_change_value: f64,
    /// Absolute change in percent, always non-negative
    pub total_change_percent: f64,
    pub is_price_decrease: bool,
}

impl PortfolioSummary {
    pub fn from_tokens(tokens: &[TokenBalance]) -> Self {
        let total_value: f64 = tokens.iter().map(TokenBalance::value_usd).sum();
        let change: f64 = tokens.iter().map(TokenBalance::change_usd).sum();
        let previous = total_value - change;
        let percent = if previous.abs() > f64::EPSILON {
            change / previous * 100.0
        } else {
            0.0
        };
        Self {
            total_value,
            total_change_value: change.abs(),
            total_change_percent: percent.abs(),
            is_price_decrease: change < 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(balance: f64, price: f64, change: f64) -> TokenBalance {
        TokenBalance {
            symbol: "DOT".to_string(),
            network_key: "polkadot".to_string(),
            balance,
            price_usd: price,
            change_24h_percent: change,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_portfolio_summary() {
        let summary = PortfolioSummary::from_tokens(&[]);
        assert_eq!(summary, PortfolioSummary::default());
    }

    #[test]
    fn test_single_token_gain() {
        // price went from 5.0 to 5.5 (+10%)
        let summary = PortfolioSummary::from_tokens(&[token(10.0, 5.5, 10.0)]);
        assert!(approx(summary.total_value, 55.0));
        assert!(approx(summary.total_change_value, 5.0));
        assert!(approx(summary.total_change_percent, 10.0));
        assert!(!summary.is_price_decrease);
    }

    #[test]
    fn test_mixed_tokens_net_decrease() {
        // +10 USD on one, -20 USD on the other
        let up = token(10.0, 5.5, 10.0);
        let down = token(20.0, 4.0, -20.0);
        let summary = PortfolioSummary::from_tokens(&[up, down]);
        assert!(approx(summary.total_value, 135.0));
        assert!(approx(summary.total_change_value, 15.0));
        assert!(approx(summary.total_change_percent, 10.0));
        assert!(summary.is_price_decrease);
    }
}
