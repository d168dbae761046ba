use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use sha2::{Digest, Sha256};

use crate::cli::KeysAction;
use crate::cli::{context, output};
use crate::core::errors::{Result, SeckitError};
use crate::core::models::audit_entry::AuditAction;
use crate::core::models::key_pair::{KeyResolution, PublicKeyHandle};
use crate::core::services::keychain_facade::FACADE_ALGORITHM;

use super::audit_helpers::audited;

/// Execute the `seckit keys` command.
pub fn execute(action: &KeysAction) -> Result<()> {
    match action {
        KeysAction::Show { pem } => execute_show(*pem),
    }
}

/// Resolve the key pair (generating it on first use) and describe it.
fn execute_show(pem: bool) -> Result<()> {
    let config = context::load_config()?;
    let facade = context::open_facade(&config)?;

    let state = facade.key_resolution().state_name().to_string();
    audited(
        &config,
        AuditAction::KeyResolve,
        &[facade.key_tag()],
        Some(state),
        facade.resolve_private_key(),
    )?;
    let public_key = facade.derive_public_key()?;

    output::header(&format!("Key pair {}", facade.key_tag()));
    match facade.key_resolution() {
        KeyResolution::Found(_) => output::success("Found existing private key in the store"),
        KeyResolution::Generated(_) => output::success("Generated and stored a new private key"),
        KeyResolution::Failed(_) => {}
    }
    println!("  Size:        {} bits", public_key.rsa().size() * 8);
    println!("  Algorithm:   {FACADE_ALGORITHM}");
    println!("  Fingerprint: {}", fingerprint(&public_key)?);

    if pem {
        let pem = public_key
            .rsa()
            .to_public_key_pem(LineEnding::LF)
            .map_err(SeckitError::forwarded)?;
        println!("\n{pem}");
    }
    Ok(())
}

/// SHA-256 over the DER-encoded public key, colon-separated hex.
pub fn fingerprint(public_key: &PublicKeyHandle) -> Result<String> {
    let der = public_key
        .rsa()
        .to_public_key_der()
        .map_err(SeckitError::forwarded)?;
    let digest = Sha256::digest(der.as_bytes());
    Ok(digest
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":"))
}
