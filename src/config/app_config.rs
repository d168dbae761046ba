use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, SeckitError};

/// Current format version supported by this build of seckit.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

pub const DEFAULT_KEY_TAG: &str = "com.seckit.keys.default";
pub const DEFAULT_CLIPBOARD_NAME: &str = "CustomPasteboard";

/// Top-level configuration read from `<home>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub seckit: SeckitSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub keys: KeysSection,
    #[serde(default)]
    pub clipboard: ClipboardSection,
    pub audit: Option<AuditSection>,
}

impl AppConfig {
    /// Load the configuration from `<home>/config.toml`.
    ///
    /// After parsing, validates every filename and name that ends up in
    /// a path so a tampered config cannot escape the home directory.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = Self::path(home);
        if !config_path.exists() {
            return Err(SeckitError::NotInitialized {
                home: home.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| SeckitError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.seckit.format_version > CURRENT_FORMAT_VERSION {
            return Err(SeckitError::FormatVersionTooNew {
                project_version: config.seckit.format_version,
                supported_version: CURRENT_FORMAT_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to `<home>/config.toml`.
    pub fn save(&self, home: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| SeckitError::InvalidConfig {
            detail: format!("Failed to serialize config.toml: {e}"),
        })?;
        std::fs::write(Self::path(home), content)?;
        Ok(())
    }

    pub fn path(home: &Path) -> PathBuf {
        home.join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        validate_simple_filename(&self.store.file, "store file")?;
        validate_simple_filename(&self.store.identity_file, "identity file")?;
        if let Some(audit) = &self.audit {
            validate_simple_filename(&audit.log_file, "audit log file")?;
        }
        crate::adapters::clipboard::named_clipboard::validate_name(&self.clipboard.name)
            .map_err(|e| SeckitError::InvalidConfig {
                detail: e.to_string(),
            })?;
        if self.keys.tag.trim().is_empty() {
            return Err(SeckitError::InvalidConfig {
                detail: "[keys] tag must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seckit: SeckitSection::default(),
            store: StoreSection::default(),
            keys: KeysSection::default(),
            clipboard: ClipboardSection::default(),
            audit: Some(AuditSection {
                enabled: true,
                log_file: "audit.log".into(),
            }),
        }
    }
}

/// The `[seckit]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeckitSection {
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
}

impl Default for SeckitSection {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format_version: CURRENT_FORMAT_VERSION,
        }
    }
}

fn default_format_version() -> u32 {
    1
}

/// Which secure store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Encrypted store file in the home directory.
    #[default]
    File,
    /// In-process store, discarded on exit.
    Memory,
}

/// The `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_store_file")]
    pub file: String,
    #[serde(default = "default_identity_file")]
    pub identity_file: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            file: default_store_file(),
            identity_file: default_identity_file(),
        }
    }
}

fn default_store_file() -> String {
    "store.age".into()
}

fn default_identity_file() -> String {
    "identity.txt".into()
}

/// The `[keys]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysSection {
    /// Application tag the RSA private key is stored under.
    pub tag: String,
}

impl Default for KeysSection {
    fn default() -> Self {
        Self {
            tag: DEFAULT_KEY_TAG.into(),
        }
    }
}

/// The `[clipboard]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardSection {
    pub name: String,
}

impl Default for ClipboardSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_CLIPBOARD_NAME.into(),
        }
    }
}

/// The `[audit]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSection {
    pub enabled: bool,
    pub log_file: String,
}

/// Reject anything that is not a plain file name inside the home directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        return Err(SeckitError::InvalidConfig {
            detail: format!("Invalid {what} name '{name}': must be a plain file name"),
        });
    }
    Ok(())
}
