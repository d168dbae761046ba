use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use age::secrecy::ExposeSecret;

use crate::adapters::protection::protected_file;
use crate::core::errors::{Result, SeckitError};

/// Device-local age X25519 identity used to seal data at rest.
///
/// The encrypted store and `complete` protected files are sealed to this
/// identity. Output is ASCII-armored so sealed files stay text-friendly.
///
/// Identity file format:
/// ```text
/// # created: 2026-10-16T09:00:00Z
/// # public key: age1...
/// AGE-SECRET-KEY-1...
/// ```
#[derive(Debug, Clone)]
pub struct LocalIdentity {
    path: PathBuf,
}

/// First line of every armored age payload.
pub const ARMOR_HEADER: &str = "-----BEGIN AGE ENCRYPTED FILE-----";

impl LocalIdentity {
    /// Wrap an existing identity file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Generate a new identity at `path` (owner-only) and return it.
    pub fn generate(path: &Path) -> Result<Self> {
        let identity = age::x25519::Identity::generate();
        let public_key = identity.to_public().to_string();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let contents = zeroize::Zeroizing::new(format!(
            "# created: {created}\n# public key: {public_key}\n{}\n",
            identity.to_string().expose_secret()
        ));
        protected_file::write_atomic(path, contents.as_bytes(), Some(0o600))?;

        tracing::debug!(path = %path.display(), "generated local identity");
        Ok(Self::new(path.to_path_buf()))
    }

    /// Use the identity at `path`, generating it on first use.
    pub fn open_or_generate(path: &Path) -> Result<Self> {
        if path.exists() {
            Ok(Self::new(path.to_path_buf()))
        } else {
            Self::generate(path)
        }
    }

    /// Public key string (`age1...`) of this identity.
    pub fn public_key(&self) -> Result<String> {
        let content = self.read_file()?;

        if let Some(key) = content
            .lines()
            .find_map(|line| line.strip_prefix("# public key: "))
        {
            return Ok(key.trim().to_string());
        }

        Ok(self.load_identity()?.to_public().to_string())
    }

    /// Encrypt `plaintext` to this identity, armored.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let recipient = self.load_identity()?.to_public();

        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
                .map_err(|e| sealing(format!("{e}")))?;

        let mut output = Vec::new();
        let armored =
            age::armor::ArmoredWriter::wrap_output(&mut output, age::armor::Format::AsciiArmor)
                .map_err(|e| sealing(format!("armor writer failed: {e}")))?;

        let mut writer = encryptor
            .wrap_output(armored)
            .map_err(|e| sealing(format!("encryption stream failed: {e}")))?;

        writer
            .write_all(plaintext)
            .map_err(|e| sealing(format!("write failed: {e}")))?;

        writer
            .finish()
            .and_then(|armor| armor.finish())
            .map_err(|e| sealing(format!("finish failed: {e}")))?;

        Ok(output)
    }

    /// Decrypt an armored payload produced by [`LocalIdentity::seal`].
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        let identity = self.load_identity()?;

        let armored_reader = age::armor::ArmoredReader::new(sealed);
        let decryptor = age::Decryptor::new(armored_reader)
            .map_err(|e| sealing(format!("invalid sealed payload: {e}")))?;

        let mut reader = decryptor
            .decrypt(std::iter::once(&identity as &dyn age::Identity))
            .map_err(|e| sealing(format!("payload not sealed to this identity: {e}")))?;

        let mut plaintext = Vec::new();
        reader
            .read_to_end(&mut plaintext)
            .map_err(|e| sealing(format!("read failed: {e}")))?;

        Ok(plaintext)
    }

    fn read_file(&self) -> Result<zeroize::Zeroizing<String>> {
        std::fs::read_to_string(&self.path)
            .map(zeroize::Zeroizing::new)
            .map_err(|_| SeckitError::FileNotFound {
                path: self.path.clone(),
            })
    }

    fn load_identity(&self) -> Result<age::x25519::Identity> {
        let content = self.read_file()?;
        content
            .lines()
            .find(|l| l.starts_with("AGE-SECRET-KEY-"))
            .ok_or_else(|| SeckitError::InvalidConfig {
                detail: format!("No secret key found in {}", self.path.display()),
            })?
            .parse()
            .map_err(|e| SeckitError::InvalidConfig {
                detail: format!("Invalid age key in {}: {e}", self.path.display()),
            })
    }
}

/// Whether `bytes` look like an armored age payload.
pub fn is_sealed(bytes: &[u8]) -> bool {
    bytes.starts_with(ARMOR_HEADER.as_bytes())
}

fn sealing(reason: String) -> SeckitError {
    SeckitError::SealingFailed { reason }
}
