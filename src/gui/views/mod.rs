//! View modules for the GUI
//!
//! Each submodule contains the rendering logic for one screen.
//!
//! ## Module Structure
//!
//! - `home` - Crypto and Staking tabs
//! - `withdraw_auth` - Withdrawal confirmation (fee preview, password, submission)
//! - `withdraw_result` - Outcome of a submitted withdrawal
//! - `lock` - PIN lock screen
//! - `settings` - User settings
//!
//! ## Implementation Notes
//!
//! Most views are `GuiApp` methods taking `&mut egui::Ui`, called from
//! `App::update` in `app.rs`. The withdrawal screen keeps its own state in
//! `WithdrawAuthScreen`, which lives inside the route.

pub mod home;
pub mod lock;
pub mod settings;
pub mod withdraw_auth;
pub mod withdraw_result;

pub use lock::LockState;
pub use settings::{PinSetup, SettingsState};
pub use withdraw_auth::{WithdrawAuthAction, WithdrawAuthScreen};
