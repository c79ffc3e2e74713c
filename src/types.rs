//! Common types shared across modules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the on-chain withdrawal operation to perform.
///
/// The flow never interprets it; it is handed back to the backend verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WithdrawalAction(pub String);

impl WithdrawalAction {
    pub fn new(action: impl Into<String>) -> Self {
        Self(action.into())
    }

    /// Withdraw unbonded funds once the unbonding period is over
    pub fn withdraw() -> Self {
        Self::new("withdraw")
    }

    /// Redeem a liquid-staking position
    pub fn redeem() -> Self {
        Self::new("redeem")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WithdrawalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tabs of the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HomeTab {
    #[default]
    Crypto,
    Staking,
}

impl HomeTab {
    pub fn title(&self) -> &'static str {
        match self {
            HomeTab::Crypto => "Crypto",
            HomeTab::Staking => "Staking",
        }
    }
}

/// Navigation parameters of the withdrawal confirmation screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawParams {
    /// Amount to withdraw, already in display units (e.g. "5" DOT)
    pub withdraw_amount: String,
    pub network_key: String,
    pub selected_account: String,
    pub next_withdrawal_action: WithdrawalAction,
    pub target_validator: Option<String>,
}

impl WithdrawParams {
    /// Whether `other` would need a fresh fee preview.
    ///
    /// The amount is display-only; everything sent to the backend counts.
    pub fn same_target(&self, other: &WithdrawParams) -> bool {
        self.network_key == other.network_key
            && self.selected_account == other.selected_account
            && self.next_withdrawal_action == other.next_withdrawal_action
            && self.target_validator == other.target_validator
    }
}

/// Fee estimate and balance check returned by the backend before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPreview {
    /// Fee as reported by the backend: "<amount> <token>"
    pub fee_string: String,
    pub balance_insufficient: bool,
}

impl TransactionPreview {
    pub fn new(fee_string: impl Into<String>, balance_insufficient: bool) -> Self {
        Self {
            fee_string: fee_string.into(),
            balance_insufficient,
        }
    }

    /// Fee amount part of the fee string
    pub fn fee(&self) -> &str {
        crate::utils::split_fee_string(&self.fee_string).0
    }

    /// Fee token part of the fee string (empty when the backend sent none)
    pub fn fee_token(&self) -> &str {
        crate::utils::split_fee_string(&self.fee_string).1
    }
}

/// Outcome of a submitted withdrawal as shown on the result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxParams {
    pub extrinsic_hash: Option<String>,
    pub tx_success: bool,
    /// Empty on success
    pub tx_error: String,
}

/// Everything the result screen needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawResultParams {
    pub withdraw_params: WithdrawParams,
    pub tx_params: TxParams,
}

/// A staking position with funds that can be withdrawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPosition {
    pub network_key: String,
    pub address: String,
    pub unlocking_amount: String,
    pub next_withdrawal_action: WithdrawalAction,
    pub validator: Option<String>,
}

impl StakingPosition {
    pub fn withdraw_params(&self) -> WithdrawParams {
        WithdrawParams {
            withdraw_amount: self.unlocking_amount.clone(),
            network_key: self.network_key.clone(),
            selected_account: self.address.clone(),
            next_withdrawal_action: self.next_withdrawal_action.clone(),
            target_validator: self.validator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> WithdrawParams {
        WithdrawParams {
            withdraw_amount: "5".to_string(),
            network_key: "polkadot".to_string(),
            selected_account: "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5".to_string(),
            next_withdrawal_action: WithdrawalAction::withdraw(),
            target_validator: None,
        }
    }

    #[test]
    fn test_same_target_ignores_amount() {
        let a = params();
        let mut b = params();
        b.withdraw_amount = "7".to_string();
        assert!(a.same_target(&b));
    }

    #[test]
    fn test_same_target_detects_validator_change() {
        let a = params();
        let mut b = params();
        b.target_validator = Some("1zugcag7cJVBtVRnFxv5Qftn7xKAnR6YJ9x4x3XLgGgmNnS".to_string());
        assert!(!a.same_target(&b));
    }

    #[test]
    fn test_preview_fee_parts() {
        let preview = TransactionPreview::new("0.015 DOT", false);
        assert_eq!(preview.fee(), "0.015");
        assert_eq!(preview.fee_token(), "DOT");
    }

    #[test]
    fn test_withdrawal_action_serializes_as_string() {
        let json = serde_json::to_string(&WithdrawalAction::redeem()).unwrap();
        assert_eq!(json, "\"redeem\"");
    }

    #[test]
    fn test_position_to_params() {
        let position = StakingPosition {
            network_key: "kusama".to_string(),
            address: "HNZata7iMYWmk5RvZRTiAsSDhV8366zq2YGb3tLH5Upf74F".to_string(),
            unlocking_amount: "1.5".to_string(),
            next_withdrawal_action: WithdrawalAction::withdraw(),
            validator: None,
        };
        let p = position.withdraw_params();
        assert_eq!(p.withdraw_amount, "1.5");
        assert_eq!(p.network_key, "kusama");
        assert_eq!(p.selected_account, position.address);
    }
}
