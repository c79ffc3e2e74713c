//! GUI module for the Kestrel application
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main GuiApp struct, routing, and background job polling
//! - `async_job` - Generic async job polling for background tasks
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `helpers` - Summary text formatting, identicon painting, window icon
//! - `notifications` - Notification history
//! - `views` - Screens (home, withdraw_auth, withdraw_result, lock, settings)
//! - `widgets` - Reusable field, PIN, password and summary widgets
//!
//! ## Usage
//!
//! ```no_run
//! use kestrel::config::Config;
//! use kestrel::gui;
//!
//! let config = Config::from_env();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```
//!
//! ## Version
//!
//! The application version is sourced from `Cargo.toml` via `env!("CARGO_PKG_VERSION")`
//! and shown in the top bar.

mod app;
pub mod async_job;
pub mod helpers;
pub mod notifications;
pub mod theme;
pub mod views;
pub mod widgets;

// Re-export main public API
pub use app::{launch, GuiApp, Route};

// Re-export commonly used types from submodules for convenience
pub use async_job::{spawn_job, AsyncJob};
pub use helpers::load_icon;
pub use notifications::NotificationEntry;
pub use theme::{configure_style, AppTheme};
pub use widgets::{AddressField, BalanceField, NetworkField, PinCodeField, TextField, TokenSummaryBlock};
