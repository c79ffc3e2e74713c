#![windows_subsystem = "windows"]

use anyhow::Result;
use kestrel::{config::Config, gui};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kestrel=info")),
        )
        .init();

    // Environment overrides; the GUI applies the saved user settings on top
    let config = Config::from_env();
    gui::launch(config)?;

    Ok(())
}
