//! Withdrawal confirmation screen
//!
//! Wraps a [`WithdrawFlow`] with the background jobs that feed it and the
//! widgets that show it. All decisions are taken by the flow; this screen
//! only runs the requests it hands out and forwards the answers.

use crate::backend::{BackendError, PreviewResponse, SubmitUpdate, WalletBackend};
use crate::gui::async_job::{spawn_job, AsyncJob};
use crate::gui::theme::AppTheme;
use crate::gui::widgets::{
    AddressField, BalanceField, NetworkField, PasswordModal, PasswordModalResponse, TextField,
};
use crate::resolvers::{AvatarResolver, NetworkResolver};
use crate::types::{HomeTab, WithdrawParams, WithdrawResultParams};
use crate::withdraw_flow::{PreviewTicket, SubmitTicket, WithdrawFlow};
use eframe::egui::{self, RichText};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use zeroize::Zeroize;

/// What the app has to do after a frame of this screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawAuthAction {
    None,
    /// Leave for the given home tab
    Cancel(HomeTab),
}

struct PreviewJob {
    generation: u64,
    job: AsyncJob<PreviewResponse>,
}

struct SubmitJob {
    submission: u64,
    updates: UnboundedReceiver<SubmitUpdate>,
    done: AsyncJob<SubmitUpdate>,
}

pub struct WithdrawAuthScreen {
    flow: WithdrawFlow,
    backend: Arc<dyn WalletBackend>,
    preview_job: Option<PreviewJob>,
    submit_job: Option<SubmitJob>,
    password_modal: PasswordModal,
}

impl WithdrawAuthScreen {
    /// Open the screen for `params` and start fetching the fee preview
    pub fn new(
        params: WithdrawParams,
        native_token: Option<String>,
        backend: Arc<dyn WalletBackend>,
    ) -> Self {
        let mut screen = Self {
            flow: WithdrawFlow::new(params, native_token),
            backend,
            preview_job: None,
            submit_job: None,
            password_modal: PasswordModal::new(),
        };
        let ticket = screen.flow.request_preview();
        screen.start_preview(ticket);
        screen
    }

    pub fn flow(&self) -> &WithdrawFlow {
        &self.flow
    }

    /// New parameters for the same screen (e.g. after a portfolio refresh)
    pub fn update_params(&mut self, params: WithdrawParams, native_token: Option<String>) {
        if let Some(ticket) = self.flow.update_params(params, native_token) {
            self.password_modal.clear();
            self.submit_job = None;
            self.start_preview(ticket);
        }
    }

    /// Abandon the flow; late answers are ignored from here on
    pub fn cancel(&mut self) -> HomeTab {
        self.preview_job = None;
        self.submit_job = None;
        self.password_modal.clear();
        self.flow.cancel()
    }

    fn start_preview(&mut self, ticket: PreviewTicket) {
        tracing::debug!(generation = ticket.generation, "Requesting withdrawal preview");
        let backend = Arc::clone(&self.backend);
        let request = ticket.request;
        let job = spawn_job(move || {
            let preview = backend.preview(request);
            async move { Ok(preview.await?) }
        });
        self.preview_job = Some(PreviewJob {
            generation: ticket.generation,
            job,
        });
    }

    fn start_submit(&mut self, ticket: SubmitTicket) {
        let backend = Arc::clone(&self.backend);
        let request = ticket.request;
        let (tx, rx) = mpsc::unbounded_channel();
        let done = spawn_job(move || {
            let submit = backend.submit(request, tx);
            async move { Ok(submit.await?) }
        });
        self.submit_job = Some(SubmitJob {
            submission: ticket.submission,
            updates: rx,
            done,
        });
    }

    /// Feed finished background work into the flow.
    ///
    /// Returns the result screen parameters when the submission concluded.
    pub fn poll(&mut self) -> Option<WithdrawResultParams> {
        if let Some(preview) = &mut self.preview_job {
            if let Some(res) = preview.job.poll() {
                let generation = preview.generation;
                self.preview_job = None;
                self.flow.apply_preview(generation, res.map_err(backend_error));
            }
        }

        let job = self.submit_job.as_mut()?;
        let mut outcome = None;
        while let Ok(update) = job.updates.try_recv() {
            if let Some(result) = self.flow.handle_submit_update(job.submission, &update) {
                outcome = Some(result);
            }
        }
        if let Some(res) = job.done.poll() {
            match res {
                Ok(update) => {
                    if let Some(result) = self.flow.handle_submit_update(job.submission, &update) {
                        outcome = Some(result);
                    }
                }
                Err(e) => self.flow.handle_submit_failure(job.submission, &backend_error(e)),
            }
            self.submit_job = None;
        }
        outcome
    }

    pub fn is_busy(&self) -> bool {
        self.preview_job.is_some() || self.submit_job.is_some()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        theme: &AppTheme,
        networks: &dyn NetworkResolver,
        avatars: &dyn AvatarResolver,
    ) -> WithdrawAuthAction {
        let mut action = WithdrawAuthAction::None;
        let params = self.flow.params().clone();

        ui.heading(RichText::new(action_title(&params)).strong());
        ui.add_space(theme.spacing_md);

        if !self.flow.has_preview() {
            ui.vertical_centered(|ui| {
                ui.add_space(theme.spacing_lg);
                match self.flow.preview_error() {
                    Some(error) => {
                        ui.label(RichText::new(error).color(theme.danger));
                        ui.add_space(theme.spacing_sm);
                        if ui.add(theme.button_secondary("Retry")).clicked() {
                            if let Some(ticket) = self.flow.retry_preview() {
                                self.start_preview(ticket);
                            }
                        }
                    }
                    None => {
                        ui.spinner();
                        ui.label(RichText::new("Calculating fee…").color(theme.text_secondary));
                    }
                }
                ui.add_space(theme.spacing_lg);
            });
        } else {
            let token = self.flow.selected_token().to_string();
            NetworkField::new(&params.network_key, "Network").show(ui, theme, networks);
            if let Some(validator) = &params.target_validator {
                AddressField::new(validator, "Validator").show(ui, theme, avatars);
            }
            AddressField::new(&params.selected_account, "Account")
                .show_right_icon(true)
                .show(ui, theme, avatars);
            BalanceField::new(&params.withdraw_amount, &token, "Amount").show(ui, theme);
            BalanceField::new(self.flow.fee(), self.flow.fee_token(), "Fee")
                .color(theme.text_secondary)
                .show(ui, theme);
            TextField::new(&self.flow.total_string(), "Total").show(ui, theme);
        }

        ui.add_space(theme.spacing_lg);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.flow.is_submitting(), theme.button_secondary("Cancel"))
                .clicked()
            {
                action = WithdrawAuthAction::Cancel(self.cancel());
            }
            if ui
                .add_enabled(self.flow.is_ready(), theme.button_primary("Continue"))
                .clicked()
            {
                self.flow.open_password_modal();
            }
        });

        if self.flow.password_modal_visible() {
            let response = self.password_modal.show(
                ui.ctx(),
                theme,
                "Confirm withdrawal",
                self.flow.error_message(),
                self.flow.is_submitting(),
            );
            match response {
                PasswordModalResponse::Confirmed(mut password) => {
                    match self.flow.begin_submit(&password) {
                        Ok(ticket) => self.start_submit(ticket),
                        Err(e) => tracing::debug!("Submission refused: {}", e),
                    }
                    password.zeroize();
                }
                PasswordModalResponse::Canceled => self.flow.close_password_modal(),
                PasswordModalResponse::Edited => self.flow.clear_error(),
                PasswordModalResponse::None => {}
            }
        }

        action
    }
}

fn action_title(params: &WithdrawParams) -> String {
    let action = params.next_withdrawal_action.as_str();
    let mut chars = action.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => "Withdraw".to_string(),
    }
}

/// Recover the backend error from a job result
fn backend_error(error: anyhow::Error) -> BackendError {
    match error.downcast::<BackendError>() {
        Ok(e) => e,
        Err(e) => BackendError::Unavailable(e.to_string()),
    }
}
