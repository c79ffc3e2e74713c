pub mod backend;
pub mod config;
pub mod gui;
pub mod operation_log;
pub mod pin_code;
pub mod portfolio;
pub mod resolvers;
pub mod types;
pub mod user_settings;
pub mod utils;
pub mod withdraw_flow;
