use crate::types::WithdrawResultParams;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log file name
const OPERATION_LOG_FILE: &str = "operation_log.txt";

/// Get the directory where app data is stored (same as settings)
fn app_data_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join("kestrel");
        if !app_dir.exists() {
            let _ = fs::create_dir_all(&app_dir);
        }
        app_dir
    } else {
        // Fall back to current directory
        PathBuf::from(".")
    }
}

/// Get the full path to the operation log file
fn log_path() -> PathBuf {
    app_data_dir().join(OPERATION_LOG_FILE)
}

/// Get the full path to the operation log file as a string for display
pub fn log_file_path() -> String {
    log_path().display().to_string()
}

/// Append a structured log entry describing a user-requested operation.
pub fn append_log(operation: &str, network_key: &str, details: impl AsRef<str>) -> Result<()> {
    append_log_to(&log_path(), operation, network_key, details)
}

pub fn append_log_to(
    path: &Path,
    operation: &str,
    network_key: &str,
    details: impl AsRef<str>,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let timestamp = Utc::now().to_rfc3339();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open operation log {:?}", path))?;

    writeln!(
        file,
        "[{}] network={} operation={}",
        timestamp, network_key, operation
    )?;

    let body = details.as_ref();
    if body.trim().is_empty() {
        writeln!(file, "  (no additional details)")?;
    } else {
        for line in body.lines() {
            if line.trim().is_empty() {
                writeln!(file)?;
            } else {
                writeln!(file, "  {}", line)?;
            }
        }
    }

    writeln!(file)?;
    Ok(())
}

/// Detail lines recorded for a finished withdrawal
pub fn withdrawal_details(result: &WithdrawResultParams) -> String {
    let params = &result.withdraw_params;
    let tx = &result.tx_params;
    let mut details = format!(
        "account: {}\namount: {}\naction: {}\n",
        params.selected_account, params.withdraw_amount, params.next_withdrawal_action
    );
    if let Some(validator) = &params.target_validator {
        details.push_str(&format!("validator: {}\n", validator));
    }
    details.push_str(&format!(
        "status: {}\nextrinsic: {}\n",
        if tx.tx_success { "success" } else { "failed" },
        tx.extrinsic_hash.as_deref().unwrap_or("-")
    ));
    if !tx.tx_error.is_empty() {
        details.push_str(&format!("error: {}\n", tx.tx_error));
    }
    details
}

/// Record a finished withdrawal in the operation log
pub fn log_withdrawal(result: &WithdrawResultParams) -> Result<()> {
    append_log(
        "staking_withdraw",
        &result.withdraw_params.network_key,
        withdrawal_details(result),
    )
}

/// Read the entire log file content
pub fn read_log() -> Result<String> {
    let path = log_path();
    if path.exists() {
        Ok(fs::read_to_string(&path)?)
    } else {
        Ok(String::new())
    }
}
