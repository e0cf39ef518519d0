pub mod backup;
pub mod checkin;
pub mod checkout;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod report;
pub mod roster;

use crate::config::Config;
use crate::core::time_window::TimeWindow;
use crate::errors::{AppError, AppResult};

/// Resolve the organization external id: explicit --org wins, then the
/// configured default.
pub(crate) fn resolve_org(arg: &Option<String>, cfg: &Config) -> AppResult<String> {
    if let Some(org) = arg {
        return Ok(org.clone());
    }
    cfg.default_org.clone().ok_or(AppError::MissingOrganization)
}

/// Build the TimeWindow from configuration.
pub(crate) fn time_window(cfg: &Config) -> AppResult<TimeWindow> {
    Ok(TimeWindow::new(cfg.offset()?, cfg.backdate_limit_days))
}
