use crate::adapters::crypto::local_identity::LocalIdentity;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, SeckitError};
use crate::core::models::audit_entry::{AuditAction, AuditOutcome};

/// Execute the `seckit init` command.
///
/// Creates the home directory, writes `config.toml` with defaults and
/// generates the local identity that seals the store.
pub fn execute(verbose: bool) -> Result<()> {
    let home = context::home();
    let config_path = AppConfig::path(home);

    if config_path.exists() {
        return Err(SeckitError::InvalidConfig {
            detail: format!(
                "seckit is already initialized in {} (config.toml exists)",
                home.display()
            ),
        });
    }

    output::header("seckit — Initializing home");

    std::fs::create_dir_all(home)?;
    output::success(&format!("Created {}", home.display()));

    let config = AppConfig::default();
    config.save(home)?;
    output::success("Generated config.toml with defaults");

    let identity = LocalIdentity::open_or_generate(context::identity(&config).path())?;
    output::success(&format!("Local identity: {}", identity.path().display()));
    if verbose {
        output::detail(&format!("Public key: {}", identity.public_key()?));
    }

    super::audit_helpers::log_audit(
        &config,
        AuditAction::Init,
        AuditOutcome::Success,
        vec![],
        Some("home initialized".into()),
    );

    output::success("Ready.\n");
    println!("  Next steps:");
    println!("    seckit set username alice");
    println!("    seckit keys show");
    println!("    seckit demo");
    Ok(())
}
