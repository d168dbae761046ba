use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::cli::{context, output};
use crate::core::errors::{Result, SeckitError};
use crate::core::models::audit_entry::AuditAction;

use super::audit_helpers::audited;

/// Execute `seckit decrypt <base64>`.
///
/// Prints the plaintext on stdout.
pub fn execute(ciphertext: &str, quiet: bool) -> Result<()> {
    let bytes = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| SeckitError::InvalidCiphertext {
            detail: e.to_string(),
        })?;

    let config = context::load_config()?;
    let facade = context::open_facade(&config)?;

    let plaintext = audited(
        &config,
        AuditAction::Decrypt,
        &[facade.key_tag()],
        None,
        facade.decrypt(&bytes),
    )?;

    match String::from_utf8(plaintext) {
        Ok(text) => {
            if !quiet {
                output::success(&format!("Decrypted with key '{}'", facade.key_tag()));
            }
            println!("{text}");
        }
        Err(e) => {
            output::warning("Decrypted data is not valid UTF-8; printing base64");
            println!("{}", STANDARD.encode(e.as_bytes()));
        }
    }
    Ok(())
}
