use chrono::{NaiveDate, TimeZone, Utc};
use colored::Colorize;

use crate::adapters::audit::json_audit_logger::JsonAuditLogger;
use crate::cli::{context, output};
use crate::core::errors::{Result, SeckitError};
use crate::core::models::audit_entry::{AuditAction, AuditEntry, AuditOutcome};
use crate::core::traits::audit::AuditLogger;

/// Execute the `seckit log` command.
///
/// Displays the audit log with optional filters for action, date and
/// entry count.
pub fn execute(action: Option<&str>, since: Option<&str>, last: Option<usize>) -> Result<()> {
    let config = context::load_config()?;
    let logger = JsonAuditLogger::from_config(context::home(), config.audit.as_ref());

    let action_filter = action
        .map(|a| {
            a.parse::<AuditAction>()
                .map_err(|detail| SeckitError::InvalidConfig { detail })
        })
        .transpose()?;
    let since_dt = since.map(parse_since).transpose()?;

    let entries: Vec<AuditEntry> = logger
        .query(action_filter)?
        .into_iter()
        .filter(|e| since_dt.is_none_or(|s| e.timestamp >= s))
        .collect();

    if entries.is_empty() {
        output::header("seckit log");
        output::warning("No audit entries found");
        output::detail(&format!("Log file: {}", logger.path().display()));
        if action.is_some() || since.is_some() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    let skip = last.map_or(0, |n| entries.len().saturating_sub(n));
    let display = &entries[skip..];

    output::header(&format!("seckit log ({} entries)", display.len()));
    println!();
    for entry in display {
        print_entry(entry);
    }
    Ok(())
}

/// Parse a date string (`YYYY-MM-DD`) into a UTC DateTime at midnight.
fn parse_since(s: &str) -> Result<chrono::DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| SeckitError::InvalidConfig {
        detail: format!("Invalid date format: '{s}'. Expected YYYY-MM-DD, e.g. 2026-01-15"),
    })?;
    Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
}

fn print_entry(entry: &AuditEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let action = format!("{:<11}", entry.action.as_str());
    let action = match entry.outcome {
        AuditOutcome::Success => action.green(),
        AuditOutcome::Failure => action.red(),
    };
    let items = if entry.items.is_empty() {
        "—".dimmed().to_string()
    } else {
        entry.items.join(", ")
    };
    let detail = entry.detail.as_deref().unwrap_or("").dimmed();

    println!(
        "  {} {} {} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        action,
        items,
        detail,
    );
}
