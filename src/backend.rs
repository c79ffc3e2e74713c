//! Messaging layer towards the wallet backend.
//!
//! The backend knows account balances, computes fees, signs and submits
//! staking withdrawals. The GUI only talks to it through [`WalletBackend`];
//! [`SimulatedBackend`] is an in-process implementation used by the desktop
//! build and the tests.

use crate::config::{self, BackendConfig};
use crate::portfolio::{Portfolio, TokenBalance};
use crate::types::{StakingPosition, WithdrawalAction};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Boxed future returned by backend calls
pub type BackendFuture<T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'static>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Unknown network '{0}'")]
    UnknownNetwork(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub address: String,
    pub network_key: String,
    pub action: WithdrawalAction,
    pub validator_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    /// "<amount> <token>"
    pub fee: String,
    pub balance_error: bool,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub address: String,
    pub network_key: String,
    pub password: String,
    pub action: WithdrawalAction,
    pub validator_address: Option<String>,
}

// Hand-written so the password never reaches a log line
impl std::fmt::Debug for SubmitRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitRequest")
            .field("address", &self.address)
            .field("network_key", &self.network_key)
            .field("password", &"<redacted>")
            .field("action", &self.action)
            .field("validator_address", &self.validator_address)
            .finish()
    }
}

/// One update of a submission. A submission may produce several of them
/// (e.g. broadcast, then finalisation); only `status` is conclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl SubmitUpdate {
    pub fn password_error(message: impl Into<String>) -> Self {
        Self {
            password_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn tx_error(message: impl Into<String>) -> Self {
        Self {
            tx_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn broadcast(hash: impl Into<String>) -> Self {
        Self {
            transaction_hash: Some(hash.into()),
            ..Self::default()
        }
    }

    pub fn finalized(hash: impl Into<String>, success: bool) -> Self {
        Self {
            status: Some(success),
            transaction_hash: Some(hash.into()),
            ..Self::default()
        }
    }
}

pub trait WalletBackend: Send + Sync + 'static {
    /// Token balances and staking positions of `address`
    fn portfolio(&self, address: String) -> BackendFuture<Portfolio>;

    /// Fee estimate and balance check for a withdrawal
    fn preview(&self, request: PreviewRequest) -> BackendFuture<PreviewResponse>;

    /// Sign and submit a withdrawal.
    ///
    /// Intermediate updates go through `updates`; the returned future resolves
    /// with the last update once the backend is done with the submission.
    fn submit(
        &self,
        request: SubmitRequest,
        updates: UnboundedSender<SubmitUpdate>,
    ) -> BackendFuture<SubmitUpdate>;
}

/// Backend that fakes fee estimation and extrinsic submission locally.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    config: BackendConfig,
    /// Accounts whose balance cannot cover the fee
    underfunded: HashSet<String>,
    /// Accounts whose extrinsics fail on chain
    failing: HashSet<String>,
}

impl SimulatedBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            underfunded: HashSet::new(),
            failing: HashSet::new(),
        }
    }

    pub fn with_underfunded(mut self, address: impl Into<String>) -> Self {
        self.underfunded.insert(address.into());
        self
    }

    pub fn with_failing(mut self, address: impl Into<String>) -> Self {
        self.failing.insert(address.into());
        self
    }

    fn random_hash() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!("0x{}", hex::encode(bytes))
    }
}

// symbol, network, balance, price, 24h change
const SIMULATED_HOLDINGS: &[(&str, &str, f64, f64, f64)] = &[
    ("DOT", "polkadot", 152.4, 6.92, -2.41),
    ("KSM", "kusama", 12.75, 28.10, 1.87),
    ("ASTR", "astar", 4210.0, 0.071, 4.02),
    ("GLMR", "moonbeam", 380.5, 0.27, -0.65),
];

// network, unlocking amount, next action, validator
const SIMULATED_POSITIONS: &[(&str, &str, &str, Option<&str>)] = &[
    ("polkadot", "25.5", "withdraw", Some("1zugcag7cJVBtVRnFxv5Qftn7xKAnR6YJ9x4x3XLgGgmNnS")),
    ("kusama", "3.2", "redeem", None),
    ("westend", "100", "withdraw", Some("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty")),
];

impl WalletBackend for SimulatedBackend {
    fn portfolio(&self, address: String) -> BackendFuture<Portfolio> {
        let delay = self.config.preview_delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            let tokens = SIMULATED_HOLDINGS
                .iter()
                .map(|&(symbol, network_key, balance, price_usd, change)| TokenBalance {
                    symbol: symbol.to_string(),
                    network_key: network_key.to_string(),
                    balance,
                    price_usd,
                    change_24h_percent: change,
                })
                .collect();
            let positions = SIMULATED_POSITIONS
                .iter()
                .map(|&(network_key, amount, action, validator)| StakingPosition {
                    network_key: network_key.to_string(),
                    address: address.clone(),
                    unlocking_amount: amount.to_string(),
                    next_withdrawal_action: WithdrawalAction::new(action),
                    validator: validator.map(str::to_string),
                })
                .collect();
            Ok(Portfolio { tokens, positions })
        })
    }

    fn preview(&self, request: PreviewRequest) -> BackendFuture<PreviewResponse> {
        let delay = self.config.preview_delay;
        let fee = self.config.fee.clone();
        let balance_error = self.underfunded.contains(&request.address);
        Box::pin(async move {
            let network = config::find_network(&request.network_key)
                .ok_or_else(|| BackendError::UnknownNetwork(request.network_key.clone()))?;
            tokio::time::sleep(delay).await;
            tracing::debug!(
                network = network.key,
                action = %request.action,
                "Simulated fee preview"
            );
            Ok(PreviewResponse {
                fee: format!("{} {}", fee, network.native_token),
                balance_error,
            })
        })
    }

    fn submit(
        &self,
        request: SubmitRequest,
        updates: UnboundedSender<SubmitUpdate>,
    ) -> BackendFuture<SubmitUpdate> {
        let delay = self.config.submit_delay;
        let password_ok = request.password == self.config.password;
        let fails = self.failing.contains(&request.address);
        Box::pin(async move {
            if config::find_network(&request.network_key).is_none() {
                return Err(BackendError::UnknownNetwork(request.network_key));
            }
            if !password_ok {
                return Ok(SubmitUpdate::password_error("Invalid password"));
            }

            let hash = Self::random_hash();
            tracing::debug!(hash = %hash, "Simulated extrinsic broadcast");
            // A dropped receiver only means nobody watches the stream any more
            let _ = updates.send(SubmitUpdate::broadcast(hash.clone()));
            tokio::time::sleep(delay).await;
            Ok(SubmitUpdate::finalized(hash, !fails))
        })
    }
}
