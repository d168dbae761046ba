use std::sync::Arc;

use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::core::errors::SeckitError;
use crate::core::models::store_query::{KeyType, StoreStatus};

/// Size of every key pair the facade generates.
pub const RSA_KEY_BITS: usize = 2048;

/// Asymmetric encryption algorithms known to the crypto engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    RsaOaepSha512,
}

impl Algorithm {
    /// Digest output length in bytes; OAEP overhead is `2 * len + 2`.
    pub fn digest_len(self) -> usize {
        match self {
            Self::RsaOaepSha512 => 64,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RsaOaepSha512 => write!(f, "RSA-OAEP-SHA512"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOperation {
    Encrypt,
    Decrypt,
}

/// Key generation request handed to the crypto engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenSpec {
    pub key_type: KeyType,
    pub size_bits: usize,
    /// Application tag the private key is stored under.
    pub tag: String,
    /// Persist the private half in the secure store.
    pub permanent: bool,
}

impl KeyGenSpec {
    pub fn rsa(tag: &str) -> Self {
        Self {
            key_type: KeyType::Rsa,
            size_bits: RSA_KEY_BITS,
            tag: tag.to_string(),
            permanent: true,
        }
    }
}

/// Handle to a resolved private key. Cheap to clone.
#[derive(Clone)]
pub struct PrivateKeyHandle {
    tag: String,
    key: Arc<RsaPrivateKey>,
}

impl PrivateKeyHandle {
    pub fn new(tag: &str, key: RsaPrivateKey) -> Self {
        Self {
            tag: tag.to_string(),
            key: Arc::new(key),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn rsa(&self) -> &RsaPrivateKey {
        &self.key
    }

    /// True when both handles point at the same in-memory key.
    #[cfg(test)]
    pub fn same_key(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.key, &other.key)
    }
}

// Never print key material.
impl std::fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyHandle")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Handle to a public key derived from a private key handle.
#[derive(Debug, Clone)]
pub struct PublicKeyHandle {
    key: Arc<RsaPublicKey>,
}

impl PublicKeyHandle {
    pub fn new(key: RsaPublicKey) -> Self {
        Self { key: Arc::new(key) }
    }

    pub fn rsa(&self) -> &RsaPublicKey {
        &self.key
    }
}

/// Why a key pair could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// The lookup by tag failed with something other than "not found",
    /// or the stored key material was unreadable.
    Store(StoreStatus),
    /// Generating or persisting a new key failed.
    Generation(String),
}

impl ResolutionFailure {
    pub fn to_error(&self) -> SeckitError {
        match self {
            Self::Store(status) => SeckitError::StoreFailure { status: *status },
            Self::Generation(reason) => SeckitError::KeyGenerationError {
                reason: reason.clone(),
            },
        }
    }
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(status) => write!(f, "store lookup failed: {status}"),
            Self::Generation(reason) => write!(f, "generation failed: {reason}"),
        }
    }
}

/// Outcome of the one-time private key resolution of a facade.
#[derive(Debug, Clone)]
pub enum KeyResolution {
    /// An existing key was retrieved from the store.
    Found(PrivateKeyHandle),
    /// No key existed; a new one was generated and persisted.
    Generated(PrivateKeyHandle),
    /// Resolution failed. Kept for the facade's lifetime, never retried.
    Failed(ResolutionFailure),
}

impl KeyResolution {
    pub fn handle(&self) -> Option<&PrivateKeyHandle> {
        match self {
            Self::Found(h) | Self::Generated(h) => Some(h),
            Self::Failed(_) => None,
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::Generated(_) => "generated",
            Self::Failed(_) => "failed",
        }
    }
}
