use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;

use super::audit_helpers::audited;

/// Execute `seckit set <key> <value>`.
pub fn execute_set(key: &str, value: &str) -> Result<()> {
    let config = context::load_config()?;
    let facade = context::open_facade(&config)?;

    audited(
        &config,
        AuditAction::Set,
        &[key],
        None,
        facade.set(value, key),
    )?;

    output::success(&format!("Stored '{key}' in the {} store", facade.store().name()));
    Ok(())
}

/// Execute `seckit get <key>`. The value goes to stdout on its own line.
pub fn execute_get(key: &str) -> Result<()> {
    let config = context::load_config()?;
    let facade = context::open_facade(&config)?;

    match audited(&config, AuditAction::Read, &[key], None, facade.string(key))? {
        Some(value) => println!("{value}"),
        None => output::warning(&format!("'{key}' exists but its value is not valid UTF-8")),
    }
    Ok(())
}

/// Execute `seckit remove <key>`.
pub fn execute_remove(key: &str) -> Result<()> {
    let config = context::load_config()?;
    let facade = context::open_facade(&config)?;

    audited(&config, AuditAction::Remove, &[key], None, facade.remove(key))?;

    output::success(&format!("Removed '{key}'"));
    Ok(())
}
