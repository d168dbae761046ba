use std::path::Path;

use crate::adapters::crypto::local_identity::LocalIdentity;
use crate::adapters::protection::protected_file::ProtectedFileWriter;
use crate::cli::ProtectAction;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, SeckitError};
use crate::core::models::audit_entry::AuditAction;
use crate::core::models::protection::ProtectionLevel;

use super::audit_helpers::audited;

/// Execute the `seckit protect` command.
pub fn execute(action: &ProtectAction) -> Result<()> {
    match action {
        ProtectAction::Write { path, text, level } => execute_write(path, text, level),
        ProtectAction::Read { path } => execute_read(path),
    }
}

fn writer() -> Result<(AppConfig, ProtectedFileWriter)> {
    let config = context::load_config()?;
    let identity = LocalIdentity::open_or_generate(context::identity(&config).path())?;
    Ok((config, ProtectedFileWriter::new(identity)))
}

fn execute_write(path: &Path, text: &str, level: &str) -> Result<()> {
    let level: ProtectionLevel = level
        .parse()
        .map_err(|detail| SeckitError::InvalidConfig { detail })?;
    let (config, writer) = writer()?;

    let item = path.display().to_string();
    audited(
        &config,
        AuditAction::Protect,
        &[&item],
        Some(format!("level {level}")),
        writer.secure_save(text, path, level),
    )?;

    output::success(&format!("Saved {} ({level})", path.display()));
    Ok(())
}

fn execute_read(path: &Path) -> Result<()> {
    let (_config, writer) = writer()?;
    let text = writer.secure_read(path)?;
    println!("{text}");
    Ok(())
}
