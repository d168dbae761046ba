use std::path::PathBuf;

use crate::core::models::key_pair::Algorithm;
use crate::core::models::store_query::StoreStatus;

/// All domain errors for seckit.
///
/// The first block mirrors the keychain facade contract; the rest
/// covers configuration, files and the CLI around it.
#[derive(Debug, thiserror::Error)]
pub enum SeckitError {
    #[error("Invalid content: {detail}")]
    InvalidContent { detail: String },

    #[error("Secure store rejected the operation: {status}")]
    StoreFailure { status: StoreStatus },

    #[error("Key generation failed: {reason}")]
    KeyGenerationError { reason: String },

    #[error(
        "No public key available\n\n  \
         The key pair could not be resolved for this session.\n  \
         Run 'seckit keys show -v' to see why."
    )]
    NoPublicKey,

    #[error(
        "No private key available\n\n  \
         The key pair could not be resolved for this session.\n  \
         Run 'seckit keys show -v' to see why."
    )]
    NoPrivateKey,

    #[error("Algorithm {algorithm} is not supported by the resolved key")]
    UnsupportedAlgorithm { algorithm: Algorithm },

    #[error("Crypto engine failure: {source}")]
    Forwarded {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown crypto engine failure")]
    Unknown,

    #[error(
        "seckit is not initialized in {home}\n\n  \
         Solutions:\n    \
         → Run 'seckit init' to create it\n    \
         → Point to an existing home with --home <dir> or SECKIT_HOME"
    )]
    NotInitialized { home: PathBuf },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "This home uses format version {project_version}, but this seckit \
         only supports up to version {supported_version}.\n\n  \
         Update seckit before using this home directory."
    )]
    FormatVersionTooNew {
        project_version: u32,
        supported_version: u32,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Data protection failed for {path}: {reason}")]
    ProtectionFailed { path: PathBuf, reason: String },

    #[error("Local sealing failed: {reason}")]
    SealingFailed { reason: String },

    #[error("Clipboard error: {detail}")]
    ClipboardError { detail: String },

    #[error("Invalid ciphertext: {detail}\n\n  Expected the base64 output of 'seckit encrypt'.")]
    InvalidCiphertext { detail: String },

    #[error("Audit log error: {detail}")]
    AuditError { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SeckitError {
    pub fn invalid_content(detail: impl Into<String>) -> Self {
        Self::InvalidContent {
            detail: detail.into(),
        }
    }

    /// Wrap a lower-layer error without interpreting it.
    pub fn forwarded<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Forwarded {
            source: Box::new(source),
        }
    }

    /// Store status carried by this error, if any.
    #[cfg(test)]
    pub fn store_status(&self) -> Option<StoreStatus> {
        match self {
            Self::StoreFailure { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<StoreStatus> for SeckitError {
    fn from(status: StoreStatus) -> Self {
        Self::StoreFailure { status }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeckitError>;
