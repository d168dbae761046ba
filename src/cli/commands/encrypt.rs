use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;

use super::audit_helpers::audited;

/// Execute `seckit encrypt <text>`.
///
/// Prints the base64 ciphertext on stdout. With `--quiet` it is the
/// only line printed.
pub fn execute(text: &str, quiet: bool) -> Result<()> {
    let config = context::load_config()?;
    let facade = context::open_facade(&config)?;

    let ciphertext = audited(
        &config,
        AuditAction::Encrypt,
        &[facade.key_tag()],
        Some(format!("{} bytes", text.len())),
        facade.encrypt(text),
    )?;

    if !quiet {
        output::success(&format!(
            "Encrypted {} bytes with key '{}'",
            text.len(),
            facade.key_tag()
        ));
    }
    println!("{}", STANDARD.encode(&ciphertext));
    Ok(())
}
