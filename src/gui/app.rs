//! Main GUI application module
//!
//! Contains the GuiApp struct, navigation and background job polling.

use crate::{
    backend::{SimulatedBackend, WalletBackend},
    config::{Config, NetworkCategory, NETWORKS},
    operation_log,
    portfolio::Portfolio,
    resolvers::{AvatarResolver, HashIdenticons, NetworkRegistry, NetworkResolver},
    types::{HomeTab, StakingPosition, WithdrawParams, WithdrawResultParams},
    user_settings::UserSettings,
    utils,
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::collections::VecDeque;
use std::sync::Arc;

use super::async_job::{spawn_job, AsyncJob};
use super::helpers::{load_icon, paint_identicon};
use super::notifications::{push_notification, NotificationEntry};
use super::theme::{configure_style, AppTheme};
use super::views::{LockState, SettingsState, WithdrawAuthAction, WithdrawAuthScreen};
use super::widgets::display_address;

/// Screen currently shown in the central panel
pub enum Route {
    Home,
    WithdrawAuth(Box<WithdrawAuthScreen>),
    WithdrawResult(WithdrawResultParams),
    Lock,
    Settings,
}

impl Route {
    fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::WithdrawAuth(_) => "withdraw_auth",
            Route::WithdrawResult(_) => "withdraw_result",
            Route::Lock => "lock",
            Route::Settings => "settings",
        }
    }
}

pub struct GuiApp {
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) backend: Arc<dyn WalletBackend>,
    pub(crate) networks: NetworkRegistry,
    pub(crate) avatars: HashIdenticons,
    pub(crate) route: Route,
    pub(crate) home_tab: HomeTab,
    pub(crate) portfolio: Portfolio,
    pub(crate) portfolio_job: Option<AsyncJob<Portfolio>>,
    pub(crate) portfolio_error: Option<String>,
    pub(crate) notifications: VecDeque<NotificationEntry>,
    pub(crate) show_notifications_popup: bool,
    pub(crate) notification_toast_close_time: Option<std::time::Instant>,
    pub(crate) last_notification_count: usize,
    pub(crate) lock_state: LockState,
    pub(crate) settings_state: SettingsState,
}

impl GuiApp {
    pub fn new(config: Config, user_settings: UserSettings, backend: Arc<dyn WalletBackend>) -> Self {
        let networks = user_settings.network_registry();
        let home_tab = user_settings.default_home_tab;
        let route = if user_settings.has_pin() {
            Route::Lock
        } else {
            Route::Home
        };

        let mut app = Self {
            config,
            user_settings,
            theme: AppTheme::default(),
            backend,
            networks,
            avatars: HashIdenticons,
            route,
            home_tab,
            portfolio: Portfolio::default(),
            portfolio_job: None,
            portfolio_error: None,
            notifications: VecDeque::with_capacity(20),
            show_notifications_popup: false,
            notification_toast_close_time: None,
            last_notification_count: 0,
            lock_state: LockState::default(),
            settings_state: SettingsState::default(),
        };
        app.refresh_portfolio();
        app
    }

    pub(crate) fn is_locked(&self) -> bool {
        matches!(self.route, Route::Lock)
    }

    fn navigate(&mut self, route: Route) {
        tracing::info!(from = self.route.name(), to = route.name(), "Navigating");
        self.route = route;
    }

    pub(crate) fn navigate_home(&mut self, tab: HomeTab) {
        self.home_tab = tab;
        self.navigate(Route::Home);
    }

    pub(crate) fn unlock(&mut self) {
        self.navigate(Route::Home);
    }

    pub(crate) fn lock(&mut self) {
        if let Route::WithdrawAuth(screen) = &mut self.route {
            screen.cancel();
        }
        self.lock_state = LockState::default();
        self.navigate(Route::Lock);
    }

    /// Open the withdrawal confirmation screen for a staking position
    pub(crate) fn open_withdrawal(&mut self, position: &StakingPosition) {
        let token = self.networks.native_token(&position.network_key);
        let screen = WithdrawAuthScreen::new(position.withdraw_params(), token, Arc::clone(&self.backend));
        self.navigate(Route::WithdrawAuth(Box::new(screen)));
    }

    pub(crate) fn refresh_portfolio(&mut self) {
        let backend = Arc::clone(&self.backend);
        let account = self.config.account.clone();
        self.portfolio_job = Some(spawn_job(move || {
            let portfolio = backend.portfolio(account);
            async move { Ok(portfolio.await?) }
        }));
    }

    pub(crate) fn select_network(&mut self, network_key: &str) {
        if self.config.network_key == network_key {
            return;
        }
        self.config.network_key = network_key.to_string();
        self.user_settings.selected_network_key = network_key.to_string();
        self.save_settings();
        let name = self.networks.display_name(network_key);
        tracing::info!(network = network_key, "Switched network");
        push_notification(&mut self.notifications, format!("Switched to {}", name));
    }

    pub(crate) fn save_settings(&mut self) {
        if let Err(e) = self.user_settings.save() {
            tracing::error!("Failed to save settings: {:#}", e);
            push_notification(&mut self.notifications, format!("Failed to save settings: {}", e));
        }
    }

    fn poll_jobs(&mut self) {
        if let Some(job) = &mut self.portfolio_job {
            if let Some(res) = job.poll() {
                self.portfolio_job = None;
                match res {
                    Ok(portfolio) => {
                        self.portfolio = portfolio;
                        self.portfolio_error = None;
                        self.refresh_open_withdrawal();
                    }
                    Err(e) => {
                        tracing::error!("Failed to load portfolio: {}", e);
                        self.portfolio_error = Some(format!("Failed to load balances: {}", e));
                    }
                }
            }
        }

        let finished = match &mut self.route {
            Route::WithdrawAuth(screen) => screen.poll(),
            _ => None,
        };
        if let Some(result) = finished {
            self.finish_withdrawal(result);
        }
    }

    /// Push refreshed position data into an open withdrawal screen.
    ///
    /// Only the amount of the exact position being withdrawn is refreshed;
    /// an in-flight submission is left alone.
    fn refresh_open_withdrawal(&mut self) {
        let Route::WithdrawAuth(screen) = &mut self.route else {
            return;
        };
        if screen.flow().is_submitting() {
            return;
        }
        if let Some(position) = matching_position(&self.portfolio.positions, screen.flow().params()) {
            let token = self.networks.native_token(&position.network_key);
            screen.update_params(position.withdraw_params(), token);
        }
    }

    fn finish_withdrawal(&mut self, result: WithdrawResultParams) {
        if let Err(e) = operation_log::log_withdrawal(&result) {
            tracing::warn!("Failed to write operation log: {:#}", e);
        }
        let message = match (&result.tx_params.extrinsic_hash, result.tx_params.tx_success) {
            (Some(hash), true) => format!("Withdrawal submitted: {}", utils::short_hash(hash)),
            (None, true) => "Withdrawal submitted".to_string(),
            (_, false) => "Withdrawal failed".to_string(),
        };
        push_notification(&mut self.notifications, message);
        if result.tx_params.tx_success {
            self.refresh_portfolio();
        }
        self.navigate(Route::WithdrawResult(result));
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(self.theme.spacing_sm);
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Kestrel").strong().color(self.theme.primary));
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .small()
                        .color(self.theme.text_secondary),
                );
                if self.is_locked() {
                    return;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(self.theme.button_small("⚙")).on_hover_text("Settings").clicked() {
                        self.navigate(Route::Settings);
                    }
                    if self.user_settings.has_pin()
                        && ui.add(self.theme.button_small("🔒")).on_hover_text("Lock").clicked()
                    {
                        self.lock();
                        return;
                    }

                    let mut new_network = None;
                    egui::ComboBox::from_id_source("network_selector")
                        .selected_text(self.networks.display_name(&self.config.network_key))
                        .width(180.0)
                        .show_ui(ui, |ui| {
                            let mut last_category: Option<NetworkCategory> = None;
                            for network in NETWORKS {
                                if last_category != Some(network.category) {
                                    if last_category.is_some() {
                                        ui.separator();
                                    }
                                    let header = match network.category {
                                        NetworkCategory::RelayChain => "── Relay chains ──",
                                        NetworkCategory::Parachain => "── Parachains ──",
                                        NetworkCategory::Testnet => "── Testnets ──",
                                    };
                                    ui.label(RichText::new(header).small().color(self.theme.text_secondary));
                                    last_category = Some(network.category);
                                }
                                let label = format!(
                                    "{} · {}",
                                    self.networks.display_name(network.key),
                                    network.native_token
                                );
                                let selected = self.config.network_key == network.key;
                                if ui.selectable_label(selected, label).clicked() {
                                    new_network = Some(network.key);
                                }
                            }
                        });
                    if let Some(key) = new_network {
                        self.select_network(key);
                    }

                    ui.add_space(self.theme.spacing_sm);
                    ui.label(RichText::new(display_address(&self.config.account)).monospace())
                        .on_hover_text(self.config.account.as_str());
                    paint_identicon(ui, &self.avatars.avatar(&self.config.account), 22.0);
                });
            });
            ui.add_space(self.theme.spacing_sm);
        });
    }

    fn render_notifications(&mut self, ctx: &egui::Context) {
        let count = self.notifications.len();
        if count > self.last_notification_count {
            self.notification_toast_close_time =
                Some(std::time::Instant::now() + std::time::Duration::from_secs(5));
        }
        self.last_notification_count = count;
        let toast_visible = self
            .notification_toast_close_time
            .map(|t| std::time::Instant::now() < t)
            .unwrap_or(false);

        egui::Area::new(egui::Id::new("notification_overlay"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                self.theme.frame_card().inner_margin(egui::Margin::symmetric(10.0, 6.0)).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let bell = ui
                            .add(egui::Button::new(RichText::new("🔔").size(14.0)).frame(false))
                            .on_hover_text("Notification history");
                        if bell.clicked() {
                            self.show_notifications_popup = !self.show_notifications_popup;
                        }
                        match self.notifications.back() {
                            Some(latest) if toast_visible => {
                                ui.label(RichText::new(&latest.message).small());
                            }
                            _ if count > 0 => {
                                ui.label(RichText::new(count.to_string()).small().color(self.theme.warning));
                            }
                            _ => {}
                        }
                    });
                });
            });

        if self.show_notifications_popup {
            let mut open = true;
            egui::Window::new("Notifications")
                .collapsible(false)
                .resizable(true)
                .default_width(380.0)
                .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -50.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    if ui.add(self.theme.button_small("Clear")).clicked() {
                        self.notifications.clear();
                    }
                    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                        if self.notifications.is_empty() {
                            ui.label(RichText::new("No notifications yet.").color(self.theme.text_secondary));
                        }
                        for notification in self.notifications.iter().rev() {
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(format!("[{}]", notification.time_ago()))
                                        .small()
                                        .color(self.theme.text_secondary),
                                );
                                ui.label(&notification.message);
                            });
                        }
                    });
                });
            self.show_notifications_popup = open;
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();
        self.render_top_bar(ctx);
        self.render_notifications(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let width = AppTheme::responsive_width(ui, 320.0, 560.0, 640.0);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(width);
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        ui.add_space(self.theme.spacing_md);
                        self.render_route(ui);
                    });
                });
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

impl GuiApp {
    fn render_route(&mut self, ui: &mut egui::Ui) {
        match &mut self.route {
            Route::Home => self.view_home(ui),
            Route::Lock => self.view_lock(ui),
            Route::Settings => self.view_settings(ui),
            Route::WithdrawResult(result) => {
                let result = result.clone();
                self.view_withdraw_result(ui, &result);
            }
            Route::WithdrawAuth(screen) => {
                let action = screen.show(ui, &self.theme, &self.networks, &self.avatars);
                if let WithdrawAuthAction::Cancel(tab) = action {
                    tracing::info!("Withdrawal cancelled");
                    self.navigate_home(tab);
                }
            }
        }
    }
}

/// The position a withdrawal was opened for, if it is still in the portfolio
fn matching_position<'a>(
    positions: &'a [StakingPosition],
    current: &WithdrawParams,
) -> Option<&'a StakingPosition> {
    positions.iter().find(|p| p.withdraw_params().same_target(current))
}

/// Start the desktop app with the simulated backend
pub fn launch(mut config: Config) -> Result<()> {
    let user_settings = UserSettings::load();

    // A network picked in the app wins over the default, not over KESTREL_NETWORK
    if std::env::var("KESTREL_NETWORK").is_err()
        && crate::config::find_network(&user_settings.selected_network_key).is_some()
    {
        config.network_key = user_settings.selected_network_key.clone();
    }
    tracing::info!(network = %config.network_key, account = %config.account, "Starting Kestrel");

    let backend: Arc<dyn WalletBackend> = Arc::new(SimulatedBackend::new(config.backend.clone()));
    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        configure_style(&cc.egui_ctx, &AppTheme::default());
        Box::new(GuiApp::new(config, user_settings, backend)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([720.0, 820.0])
        .with_min_inner_size([420.0, 560.0])
        .with_icon(Arc::new(load_icon()));

    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("Kestrel", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WithdrawalAction;

    fn position(validator: &str, amount: &str) -> StakingPosition {
        StakingPosition {
            network_key: "polkadot".to_string(),
            address: "alice".to_string(),
            unlocking_amount: amount.to_string(),
            next_withdrawal_action: WithdrawalAction::withdraw(),
            validator: Some(validator.to_string()),
        }
    }

    // ==================== position matching tests ====================

    #[test]
    fn test_matching_position_respects_validator() {
        let chosen = position("VALIDATOR_B", "7").withdraw_params();
        let positions = vec![position("VALIDATOR_A", "3"), position("VALIDATOR_B", "9")];
        let found = matching_position(&positions, &chosen).expect("position");
        assert_eq!(found.validator.as_deref(), Some("VALIDATOR_B"));
        assert_eq!(found.unlocking_amount, "9");
    }

    #[test]
    fn test_matching_position_gone() {
        let chosen = position("VALIDATOR_B", "7").withdraw_params();
        assert!(matching_position(&[position("VALIDATOR_A", "3")], &chosen).is_none());
    }
}
