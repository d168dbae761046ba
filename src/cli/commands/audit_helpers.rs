use chrono::Utc;

use crate::adapters::audit::json_audit_logger::JsonAuditLogger;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::audit_entry::{AuditAction, AuditEntry, AuditOutcome};
use crate::core::traits::audit::AuditLogger;

/// Name of the OS user running the command, or "unknown".
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Record an audit event. Warns on failure instead of propagating
/// the error, since audit should not block the main operation.
pub fn log_audit(
    config: &AppConfig,
    action: AuditAction,
    outcome: AuditOutcome,
    items: Vec<String>,
    detail: Option<String>,
) {
    let audit_section = config.audit.as_ref();
    if !JsonAuditLogger::is_enabled(audit_section) {
        return;
    }

    let logger = JsonAuditLogger::from_config(context::home(), audit_section);
    let entry = AuditEntry {
        timestamp: Utc::now(),
        author: current_user(),
        action,
        outcome,
        items,
        detail,
    };

    if let Err(e) = logger.log_event(&entry) {
        output::warning(&format!("Could not write audit log: {e}"));
    }
}

/// Audit the result of an operation and pass it through unchanged.
///
/// Failures are recorded with their message as detail; successes keep
/// the given detail.
pub fn audited<T>(
    config: &AppConfig,
    action: AuditAction,
    items: &[&str],
    detail: Option<String>,
    result: Result<T>,
) -> Result<T> {
    let items = items.iter().map(|s| s.to_string()).collect();
    match &result {
        Ok(_) => log_audit(config, action, AuditOutcome::Success, items, detail),
        Err(e) => log_audit(
            config,
            action,
            AuditOutcome::Failure,
            items,
            Some(first_line(&e.to_string())),
        ),
    }
    result
}

fn first_line(msg: &str) -> String {
    msg.lines().next().unwrap_or_default().to_string()
}
