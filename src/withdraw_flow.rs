//! Staking withdrawal confirmation flow.
//!
//! Owns every state transition of the withdrawal screen and nothing else:
//! it hands out requests for the caller to run against the backend and is
//! fed the answers back. Rendering lives in `gui::views::withdraw_auth`.
//!
//! ```text
//! NotReady --preview ok--> Ready --continue--> (password modal)
//!     ^                      ^                        |
//!     |                      +--- error / rejected ---+-- confirm --> Submitting
//!     +--- params changed ---+                                           |
//!                                          status received --> Finished <+
//! ```
//!
//! Every preview carries a generation number and every submission an id, so
//! answers that arrive after the screen moved on are dropped.

use crate::backend::{BackendError, PreviewRequest, PreviewResponse, SubmitRequest, SubmitUpdate};
use crate::types::{HomeTab, TransactionPreview, TxParams, WithdrawParams, WithdrawResultParams};
use crate::utils;
use thiserror::Error;

pub const BALANCE_TOO_LOW: &str = "Your balance is too low to cover fees";
pub const SUBMISSION_ERROR: &str = "Encountered an error, please try again.";
pub const TX_FAILED: &str = "Error submitting transaction";
/// Token label used when the network has no native token configured
pub const FALLBACK_TOKEN: &str = "Token";
/// Home tab the cancel action returns to
pub const CANCEL_TAB: HomeTab = HomeTab::Staking;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WithdrawError {
    #[error("Failed to fetch withdrawal fee: {0}")]
    PreviewFetchFailed(String),
    #[error("Your balance is too low to cover fees")]
    InsufficientBalance,
    #[error("{0}")]
    PasswordRejected(String),
    #[error("Encountered an error, please try again.")]
    SubmissionFailed,
    #[error("Submit request failed: {0}")]
    SubmitRequestFailed(String),
    #[error("Withdrawal is not ready for submission")]
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    /// Waiting for the fee preview
    NotReady,
    /// Preview applied, confirm available
    Ready,
    /// Submit request in flight
    Submitting,
    /// Left the screen (result reached or cancelled)
    Finished,
}

/// A preview the caller must run, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTicket {
    pub generation: u64,
    pub request: PreviewRequest,
}

/// A submission the caller must run, tagged with its id.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub submission: u64,
    pub request: SubmitRequest,
}

#[derive(Debug)]
pub struct WithdrawFlow {
    params: WithdrawParams,
    native_token: Option<String>,
    phase: FlowPhase,
    generation: u64,
    preview: Option<TransactionPreview>,
    preview_error: Option<String>,
    password_modal_visible: bool,
    error_message: Option<String>,
    submission: u64,
}

impl WithdrawFlow {
    /// Create the flow for `params`; call [`Self::request_preview`] to start it
    pub fn new(params: WithdrawParams, native_token: Option<String>) -> Self {
        Self {
            params,
            native_token,
            phase: FlowPhase::NotReady,
            generation: 0,
            preview: None,
            preview_error: None,
            password_modal_visible: false,
            error_message: None,
            submission: 0,
        }
    }

    /// Drop any preview and ask for a new one under a fresh generation
    pub fn request_preview(&mut self) -> PreviewTicket {
        self.reset();
        self.generation += 1;
        PreviewTicket {
            generation: self.generation,
            request: PreviewRequest {
                address: self.params.selected_account.clone(),
                network_key: self.params.network_key.clone(),
                action: self.params.next_withdrawal_action.clone(),
                validator_address: self.params.target_validator.clone(),
            },
        }
    }

    /// Replace the parameters. Returns a preview to run when the target changed.
    pub fn update_params(
        &mut self,
        params: WithdrawParams,
        native_token: Option<String>,
    ) -> Option<PreviewTicket> {
        if self.phase == FlowPhase::Submitting {
            tracing::debug!("Ignoring parameter update while a submission is in flight");
            return None;
        }
        let refetch = !self.params.same_target(&params) || self.phase == FlowPhase::Finished;
        self.params = params;
        self.native_token = native_token;
        if refetch {
            tracing::debug!(generation = self.generation, "Withdrawal target changed, refetching preview");
            Some(self.request_preview())
        } else {
            None
        }
    }

    /// Apply a preview answer. Returns `true` when the flow became ready.
    pub fn apply_preview(
        &mut self,
        generation: u64,
        result: Result<PreviewResponse, BackendError>,
    ) -> bool {
        if generation != self.generation || self.phase != FlowPhase::NotReady {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale withdrawal preview"
            );
            return false;
        }

        match result {
            Ok(resp) => {
                self.preview = Some(TransactionPreview::new(resp.fee, resp.balance_error));
                self.preview_error = None;
                self.phase = FlowPhase::Ready;
                true
            }
            Err(e) => {
                let err = WithdrawError::PreviewFetchFailed(e.to_string());
                tracing::error!("{}", err);
                self.preview_error = Some(err.to_string());
                false
            }
        }
    }

    /// Manual retry after a failed preview
    pub fn retry_preview(&mut self) -> Option<PreviewTicket> {
        if self.phase == FlowPhase::NotReady && self.preview_error.is_some() {
            Some(self.request_preview())
        } else {
            None
        }
    }

    /// "Continue": show the password modal. Only possible once ready.
    pub fn open_password_modal(&mut self) -> bool {
        if self.phase == FlowPhase::Ready {
            self.password_modal_visible = true;
            true
        } else {
            false
        }
    }

    pub fn close_password_modal(&mut self) {
        self.password_modal_visible = false;
        self.error_message = None;
    }

    /// Clear the inline modal error (e.g. when the password is edited)
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Confirm with `password`; the caller runs the returned submission.
    ///
    /// An underfunded preview is refused up front with the balance message
    /// instead of sending a transaction that cannot pay its fee.
    pub fn begin_submit(&mut self, password: &str) -> Result<SubmitTicket, WithdrawError> {
        if self.phase != FlowPhase::Ready {
            return Err(WithdrawError::NotReady);
        }
        if self.balance_insufficient() {
            self.error_message = Some(BALANCE_TOO_LOW.to_string());
            return Err(WithdrawError::InsufficientBalance);
        }

        self.submission += 1;
        self.phase = FlowPhase::Submitting;
        self.error_message = None;
        tracing::info!(
            network = %self.params.network_key,
            action = %self.params.next_withdrawal_action,
            "Submitting staking withdrawal"
        );
        Ok(SubmitTicket {
            submission: self.submission,
            request: SubmitRequest {
                address: self.params.selected_account.clone(),
                network_key: self.params.network_key.clone(),
                password: password.to_string(),
                action: self.params.next_withdrawal_action.clone(),
                validator_address: self.params.target_validator.clone(),
            },
        })
    }

    /// Handle one submission update.
    ///
    /// Safe to call any number of times: updates for another submission, or
    /// arriving after the outcome was decided, do nothing. Returns the result
    /// screen parameters exactly once, when a definite status arrives.
    pub fn handle_submit_update(
        &mut self,
        submission: u64,
        update: &SubmitUpdate,
    ) -> Option<WithdrawResultParams> {
        if submission != self.submission || self.phase != FlowPhase::Submitting {
            return None;
        }

        if self.balance_insufficient() {
            self.fail(WithdrawError::InsufficientBalance);
            return None;
        }
        if let Some(password_error) = &update.password_error {
            self.fail(WithdrawError::PasswordRejected(password_error.clone()));
            return None;
        }
        if let Some(tx_error) = &update.tx_error {
            tracing::warn!("Withdrawal rejected by backend: {}", tx_error);
            self.fail(WithdrawError::SubmissionFailed);
            return None;
        }

        let success = update.status?;
        self.password_modal_visible = false;
        self.phase = FlowPhase::Finished;
        tracing::info!(
            success,
            hash = update.transaction_hash.as_deref().unwrap_or("-"),
            "Staking withdrawal finished"
        );
        Some(WithdrawResultParams {
            withdraw_params: self.params.clone(),
            tx_params: TxParams {
                extrinsic_hash: update.transaction_hash.clone(),
                tx_success: success,
                tx_error: if success { String::new() } else { TX_FAILED.to_string() },
            },
        })
    }

    /// The submit request itself failed (backend unreachable, ...)
    pub fn handle_submit_failure(&mut self, submission: u64, error: &BackendError) {
        if submission != self.submission || self.phase != FlowPhase::Submitting {
            return;
        }
        tracing::error!("{}", WithdrawError::SubmitRequestFailed(error.to_string()));
        self.phase = FlowPhase::Ready;
        self.error_message = Some(SUBMISSION_ERROR.to_string());
    }

    /// Leave the screen. In-flight answers are ignored from now on.
    pub fn cancel(&mut self) -> HomeTab {
        self.generation += 1;
        self.submission += 1;
        self.password_modal_visible = false;
        self.phase = FlowPhase::Finished;
        CANCEL_TAB
    }

    fn fail(&mut self, error: WithdrawError) {
        self.error_message = Some(error.to_string());
        self.phase = FlowPhase::Ready;
    }

    fn reset(&mut self) {
        self.phase = FlowPhase::NotReady;
        self.preview = None;
        self.preview_error = None;
        self.password_modal_visible = false;
        self.error_message = None;
        // detach any submission still running
        self.submission += 1;
    }

    fn balance_insufficient(&self) -> bool {
        self.preview
            .as_ref()
            .map(|p| p.balance_insufficient)
            .unwrap_or(false)
    }

    pub fn params(&self) -> &WithdrawParams {
        &self.params
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == FlowPhase::Ready
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FlowPhase::Submitting
    }

    /// Whether the preview has been applied for the current parameters
    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn preview(&self) -> Option<&TransactionPreview> {
        self.preview.as_ref()
    }

    pub fn preview_error(&self) -> Option<&str> {
        self.preview_error.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn password_modal_visible(&self) -> bool {
        self.password_modal_visible
    }

    /// Native token of the network, or "Token"
    pub fn selected_token(&self) -> &str {
        self.native_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_TOKEN)
    }

    pub fn fee_string(&self) -> &str {
        self.preview.as_ref().map(|p| p.fee_string.as_str()).unwrap_or("")
    }

    pub fn fee(&self) -> &str {
        self.preview.as_ref().map(|p| p.fee()).unwrap_or("")
    }

    pub fn fee_token(&self) -> &str {
        self.preview.as_ref().map(|p| p.fee_token()).unwrap_or("")
    }

    /// "<amount> <token> + <fee> <fee token>"
    pub fn total_string(&self) -> String {
        utils::total_cost_string(
            &self.params.withdraw_amount,
            self.selected_token(),
            self.fee_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WithdrawalAction;

    fn params() -> WithdrawParams {
        WithdrawParams {
            withdraw_amount: "5".to_string(),
            network_key: "polkadot".to_string(),
            selected_account: "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5".to_string(),
            next_withdrawal_action: WithdrawalAction::withdraw(),
            target_validator: Some("1zugcag7cJVBtVRnFxv5Qftn7xKAnR6YJ9x4x3XLgGgmNnS".to_string()),
        }
    }

    fn preview(balance_error: bool) -> Result<PreviewResponse, BackendError> {
        Ok(PreviewResponse {
            fee: "0.015 DOT".to_string(),
            balance_error,
        })
    }

    fn ready_flow(balance_error: bool) -> WithdrawFlow {
        let mut flow = WithdrawFlow::new(params(), Some("DOT".to_string()));
        let ticket = flow.request_preview();
        assert!(flow.apply_preview(ticket.generation, preview(balance_error)));
        flow
    }

    fn submitting_flow() -> (WithdrawFlow, u64) {
        let mut flow = ready_flow(false);
        assert!(flow.open_password_modal());
        let ticket = flow.begin_submit("password").unwrap();
        (flow, ticket.submission)
    }

    // ==================== preview tests ====================

    #[test]
    fn test_initial_state_not_ready() {
        let mut flow = WithdrawFlow::new(params(), Some("DOT".to_string()));
        let ticket = flow.request_preview();
        assert_eq!(flow.phase(), FlowPhase::NotReady);
        assert!(!flow.open_password_modal());
        assert_eq!(ticket.request.address, params().selected_account);
        assert_eq!(ticket.request.network_key, "polkadot");
        assert_eq!(ticket.request.action, WithdrawalAction::withdraw());
        assert_eq!(ticket.request.validator_address, params().target_validator);
    }

    #[test]
    fn test_preview_makes_flow_ready() {
        let flow = ready_flow(false);
        assert!(flow.is_ready());
        assert_eq!(flow.fee(), "0.015");
        assert_eq!(flow.fee_token(), "DOT");
        assert_eq!(flow.total_string(), "5 DOT + 0.015 DOT");
    }

    #[test]
    fn test_preview_applied_only_once() {
        let mut flow = WithdrawFlow::new(params(), None);
        let ticket = flow.request_preview();
        assert!(flow.apply_preview(ticket.generation, preview(false)));
        assert!(!flow.apply_preview(ticket.generation, preview(true)));
        assert!(!flow.preview().unwrap().balance_insufficient);
    }

    #[test]
    fn test_stale_preview_is_discarded_after_params_change() {
        let mut flow = WithdrawFlow::new(params(), Some("DOT".to_string()));
        let first = flow.request_preview();

        let mut changed = params();
        changed.network_key = "kusama".to_string();
        let second = flow
            .update_params(changed, Some("KSM".to_string()))
            .expect("target changed");
        assert!(second.generation > first.generation);

        assert!(!flow.apply_preview(first.generation, preview(false)));
        assert_eq!(flow.phase(), FlowPhase::NotReady);
        assert!(flow.preview().is_none());

        assert!(flow.apply_preview(
            second.generation,
            Ok(PreviewResponse {
                fee: "0.002 KSM".to_string(),
                balance_error: false
            })
        ));
        assert_eq!(flow.total_string(), "5 KSM + 0.002 KSM");
    }

    #[test]
    fn test_params_change_clears_ready_preview() {
        let mut flow = ready_flow(false);
        let mut changed = params();
        changed.target_validator = None;
        assert!(flow.update_params(changed, Some("DOT".to_string())).is_some());
        assert_eq!(flow.phase(), FlowPhase::NotReady);
        assert!(flow.preview().is_none());
        assert_eq!(flow.fee_string(), "");
    }

    #[test]
    fn test_amount_change_keeps_preview() {
        let mut flow = ready_flow(false);
        let mut changed = params();
        changed.withdraw_amount = "7".to_string();
        assert!(flow.update_params(changed, Some("DOT".to_string())).is_none());
        assert!(flow.is_ready());
        assert_eq!(flow.total_string(), "7 DOT + 0.015 DOT");
    }

    #[test]
    fn test_preview_failure_stays_not_ready_and_allows_retry() {
        let mut flow = WithdrawFlow::new(params(), None);
        let ticket = flow.request_preview();
        assert!(flow.retry_preview().is_none());
        assert!(!flow.apply_preview(
            ticket.generation,
            Err(BackendError::Unavailable("timeout".to_string()))
        ));
        assert_eq!(flow.phase(), FlowPhase::NotReady);
        assert!(flow.preview_error().unwrap().contains("timeout"));

        let retry = flow.retry_preview().unwrap();
        assert!(retry.generation > ticket.generation);
        assert!(flow.preview_error().is_none());
    }

    #[test]
    fn test_selected_token_fallback() {
        let flow = WithdrawFlow::new(params(), None);
        assert_eq!(flow.selected_token(), "Token");
        let flow = WithdrawFlow::new(params(), Some(String::new()));
        assert_eq!(flow.selected_token(), "Token");
    }

    // ==================== submission tests ====================

    #[test]
    fn test_begin_submit_requires_ready() {
        let mut flow = WithdrawFlow::new(params(), None);
        flow.request_preview();
        assert_eq!(flow.begin_submit("password").unwrap_err(), WithdrawError::NotReady);
    }

    #[test]
    fn test_begin_submit_blocks_repeat_submission() {
        let (mut flow, _) = submitting_flow();
        assert!(flow.is_submitting());
        assert_eq!(flow.begin_submit("password").unwrap_err(), WithdrawError::NotReady);
    }

    #[test]
    fn test_submit_request_carries_password_and_target() {
        let mut flow = ready_flow(false);
        flow.open_password_modal();
        let ticket = flow.begin_submit("s3cret").unwrap();
        assert_eq!(ticket.request.password, "s3cret");
        assert_eq!(ticket.request.address, params().selected_account);
        assert_eq!(ticket.request.validator_address, params().target_validator);
    }

    #[test]
    fn test_insufficient_balance_never_navigates() {
        let mut flow = ready_flow(true);
        flow.open_password_modal();
        assert_eq!(
            flow.begin_submit("password").unwrap_err(),
            WithdrawError::InsufficientBalance
        );
        assert_eq!(flow.error_message(), Some(BALANCE_TOO_LOW));
        assert!(flow.is_ready());
        assert!(flow.password_modal_visible());
    }

    #[test]
    fn test_success_status_navigates_with_hash() {
        let (mut flow, id) = submitting_flow();
        let result = flow
            .handle_submit_update(id, &SubmitUpdate::finalized("0xabc", true))
            .unwrap();
        assert!(result.tx_params.tx_success);
        assert_eq!(result.tx_params.extrinsic_hash.as_deref(), Some("0xabc"));
        assert_eq!(result.tx_params.tx_error, "");
        assert_eq!(result.withdraw_params, params());
        assert_eq!(flow.phase(), FlowPhase::Finished);
        assert!(!flow.password_modal_visible());
    }

    #[test]
    fn test_failed_status_navigates_with_generic_error() {
        let (mut flow, id) = submitting_flow();
        let result = flow
            .handle_submit_update(id, &SubmitUpdate::finalized("0xdef", false))
            .unwrap();
        assert!(!result.tx_params.tx_success);
        assert_eq!(result.tx_params.tx_error, TX_FAILED);
    }

    #[test]
    fn test_terminal_outcome_is_reported_once() {
        let (mut flow, id) = submitting_flow();
        let update = SubmitUpdate::finalized("0xabc", true);
        assert!(flow.handle_submit_update(id, &update).is_some());
        assert!(flow.handle_submit_update(id, &update).is_none());
        assert!(flow.handle_submit_update(id, &SubmitUpdate::tx_error("late")).is_none());
        assert!(flow.error_message().is_none());
    }

    #[test]
    fn test_intermediate_update_keeps_submitting() {
        let (mut flow, id) = submitting_flow();
        assert!(flow.handle_submit_update(id, &SubmitUpdate::broadcast("0xabc")).is_none());
        assert!(flow.is_submitting());
        assert!(flow.handle_submit_update(id, &SubmitUpdate::finalized("0xabc", true)).is_some());
    }

    #[test]
    fn test_password_error_shown_inline_and_resubmission_allowed() {
        let (mut flow, id) = submitting_flow();
        assert!(flow
            .handle_submit_update(id, &SubmitUpdate::password_error("Invalid password"))
            .is_none());
        assert_eq!(flow.error_message(), Some("Invalid password"));
        assert!(flow.is_ready());
        assert!(flow.password_modal_visible());
        assert!(flow.begin_submit("password").is_ok());
    }

    #[test]
    fn test_tx_error_short_circuits_status() {
        let (mut flow, id) = submitting_flow();
        let update = SubmitUpdate {
            tx_error: Some("pool rejected".to_string()),
            status: Some(true),
            transaction_hash: Some("0xabc".to_string()),
            ..SubmitUpdate::default()
        };
        assert!(flow.handle_submit_update(id, &update).is_none());
        assert_eq!(flow.error_message(), Some(SUBMISSION_ERROR));
        assert!(flow.is_ready());
    }

    #[test]
    fn test_updates_from_abandoned_submission_ignored() {
        let (mut flow, first) = submitting_flow();
        flow.handle_submit_update(first, &SubmitUpdate::password_error("Invalid password"));
        let second = flow.begin_submit("password").unwrap().submission;
        assert!(flow
            .handle_submit_update(first, &SubmitUpdate::finalized("0xold", true))
            .is_none());
        let result = flow
            .handle_submit_update(second, &SubmitUpdate::finalized("0xnew", true))
            .unwrap();
        assert_eq!(result.tx_params.extrinsic_hash.as_deref(), Some("0xnew"));
    }

    #[test]
    fn test_submit_request_failure_surfaces_error() {
        let (mut flow, id) = submitting_flow();
        flow.handle_submit_failure(id, &BackendError::Unavailable("offline".to_string()));
        assert!(flow.is_ready());
        assert_eq!(flow.error_message(), Some(SUBMISSION_ERROR));
    }

    #[test]
    fn test_cancel_detaches_in_flight_work() {
        let (mut flow, id) = submitting_flow();
        assert_eq!(flow.cancel(), HomeTab::Staking);
        assert!(flow
            .handle_submit_update(id, &SubmitUpdate::finalized("0xabc", true))
            .is_none());
        assert_eq!(flow.phase(), FlowPhase::Finished);
    }

    #[test]
    fn test_params_frozen_while_submitting() {
        let (mut flow, id) = submitting_flow();
        let mut changed = params();
        changed.target_validator = Some("VALIDATOR_A".to_string());
        changed.withdraw_amount = "3".to_string();
        assert!(flow.update_params(changed, Some("DOT".to_string())).is_none());
        assert!(flow.is_submitting());
        assert_eq!(flow.params(), &params());

        let result = flow
            .handle_submit_update(id, &SubmitUpdate::finalized("0xabc", true))
            .unwrap();
        assert_eq!(result.withdraw_params, params());
    }

    #[test]
    fn test_close_modal_clears_error() {
        let mut flow = ready_flow(true);
        flow.open_password_modal();
        let _ = flow.begin_submit("password");
        flow.close_password_modal();
        assert!(!flow.password_modal_visible());
        assert!(flow.error_message().is_none());
        assert!(flow.is_ready());
    }
}
