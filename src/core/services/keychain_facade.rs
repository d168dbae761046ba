use std::sync::OnceLock;

use crate::core::errors::{Result, SeckitError};
use crate::core::models::key_pair::{
    Algorithm, KeyGenSpec, KeyOperation, KeyResolution, PrivateKeyHandle, PublicKeyHandle,
    ResolutionFailure,
};
use crate::core::models::store_query::{
    KeyType, MatchLimit, ReturnShape, StoreQuery, StoreStatus,
};
use crate::core::traits::crypto_engine::{CryptoEngine, KeyRef};
use crate::core::traits::secure_store::SecureStore;

/// Algorithm used for every encrypt/decrypt call.
pub const FACADE_ALGORITHM: Algorithm = Algorithm::RsaOaepSha512;

/// Credential storage and key-pair lifecycle over a `SecureStore`
/// and a `CryptoEngine`.
///
/// Credentials are never cached: each read goes to the store. The key
/// pair is resolved at most once per instance (retrieve by tag, else
/// generate and persist) and the outcome, success or failure, is kept
/// until the facade is dropped.
pub struct KeychainFacade<S: SecureStore, E: CryptoEngine> {
    store: S,
    engine: E,
    key_tag: String,
    resolution: OnceLock<KeyResolution>,
    public_key: OnceLock<Option<PublicKeyHandle>>,
}

impl<S: SecureStore, E: CryptoEngine> KeychainFacade<S, E> {
    pub fn new(store: S, engine: E, key_tag: impl Into<String>) -> Self {
        Self {
            store,
            engine,
            key_tag: key_tag.into(),
            resolution: OnceLock::new(),
            public_key: OnceLock::new(),
        }
    }

    pub fn key_tag(&self) -> &str {
        &self.key_tag
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ---- credentials -------------------------------------------------

    /// Store `value` under `key`. Insert-only: an existing entry makes
    /// this fail with `StoreFailure(DuplicateItem)`.
    pub fn set(&self, value: &str, key: &str) -> Result<()> {
        if value.is_empty() || key.is_empty() {
            tracing::warn!("refusing to store an empty credential");
            return Err(SeckitError::invalid_content(
                "credential name and value must not be empty",
            ));
        }

        self.store
            .add(&StoreQuery::credential(key), value.as_bytes())?;
        tracing::debug!(key, backend = self.store.name(), "credential stored");
        Ok(())
    }

    /// Delete the entry stored under `key`.
    pub fn remove(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            tracing::warn!("refusing to remove an empty credential name");
            return Err(SeckitError::invalid_content(
                "credential name must not be empty",
            ));
        }

        self.store.delete(&StoreQuery::credential(key))?;
        tracing::debug!(key, backend = self.store.name(), "credential removed");
        Ok(())
    }

    /// Read the entry stored under `key`.
    ///
    /// A payload that is not valid UTF-8 yields `Ok(None)` rather than
    /// an error.
    pub fn string(&self, key: &str) -> Result<Option<String>> {
        if key.is_empty() {
            tracing::warn!("refusing to read an empty credential name");
            return Err(SeckitError::invalid_content(
                "credential name must not be empty",
            ));
        }

        let query = StoreQuery::credential(key)
            .returning(ReturnShape::Data)
            .limit(MatchLimit::One);
        let items = self.store.copy_matching(&query)?;

        Ok(items
            .into_iter()
            .next()
            .and_then(|item| String::from_utf8(item.data).ok()))
    }

    // ---- key pair ----------------------------------------------------

    /// Resolve the key pair once and return the recorded outcome.
    ///
    /// Concurrent first callers block until the single resolution
    /// finishes; later calls return the cached result.
    pub fn key_resolution(&self) -> &KeyResolution {
        self.resolution.get_or_init(|| {
            let resolution = self.resolve_uncached();
            match &resolution {
                KeyResolution::Failed(failure) => {
                    tracing::warn!(tag = %self.key_tag, %failure, "key pair unavailable");
                }
                other => {
                    tracing::debug!(
                        tag = %self.key_tag,
                        engine = self.engine.name(),
                        state = other.state_name(),
                        "key pair resolved"
                    );
                }
            }
            resolution
        })
    }

    /// Resolved private key, surfacing the resolution failure if any.
    pub fn resolve_private_key(&self) -> Result<PrivateKeyHandle> {
        match self.key_resolution() {
            KeyResolution::Found(h) | KeyResolution::Generated(h) => Ok(h.clone()),
            KeyResolution::Failed(failure) => Err(failure.to_error()),
        }
    }

    /// Resolved private key, or `None` when resolution failed.
    pub fn private_key(&self) -> Option<PrivateKeyHandle> {
        self.key_resolution().handle().cloned()
    }

    /// Public key derived from the resolved private key.
    pub fn derive_public_key(&self) -> Result<PublicKeyHandle> {
        let private_key = self.private_key().ok_or(SeckitError::NoPrivateKey)?;
        self.public_key
            .get_or_init(|| self.engine.public_key(&private_key))
            .clone()
            .ok_or(SeckitError::NoPublicKey)
    }

    /// Public key, or `None` when no key pair is available.
    pub fn public_key(&self) -> Option<PublicKeyHandle> {
        self.derive_public_key().ok()
    }

    /// Encrypt the UTF-8 bytes of `text` under the public key.
    ///
    /// OAEP is randomized, so equal inputs give different ciphertexts.
    pub fn encrypt(&self, text: &str) -> Result<Vec<u8>> {
        let public_key = self.public_key().ok_or(SeckitError::NoPublicKey)?;

        if !self.engine.is_algorithm_supported(
            KeyRef::Public(&public_key),
            KeyOperation::Encrypt,
            FACADE_ALGORITHM,
        ) {
            return Err(SeckitError::UnsupportedAlgorithm {
                algorithm: FACADE_ALGORITHM,
            });
        }

        let ciphertext = self
            .engine
            .encrypt(&public_key, FACADE_ALGORITHM, text.as_bytes())?;
        if ciphertext.is_empty() {
            return Err(SeckitError::Unknown);
        }
        Ok(ciphertext)
    }

    /// Decrypt `ciphertext` with the private key.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let private_key = self.private_key().ok_or(SeckitError::NoPrivateKey)?;

        if !self.engine.is_algorithm_supported(
            KeyRef::Private(&private_key),
            KeyOperation::Decrypt,
            FACADE_ALGORITHM,
        ) {
            return Err(SeckitError::UnsupportedAlgorithm {
                algorithm: FACADE_ALGORITHM,
            });
        }

        if ciphertext.is_empty() {
            return Err(SeckitError::invalid_content("ciphertext is empty"));
        }

        self.engine
            .decrypt(&private_key, FACADE_ALGORITHM, ciphertext)
    }

    fn resolve_uncached(&self) -> KeyResolution {
        match self.retrieve_private_key() {
            Ok(Some(handle)) => return KeyResolution::Found(handle),
            Ok(None) => {}
            Err(status) => return KeyResolution::Failed(ResolutionFailure::Store(status)),
        }

        match self.generate_private_key() {
            Ok(Some(handle)) => KeyResolution::Generated(handle),
            // Another writer persisted a key under the tag first: use theirs.
            Ok(None) => match self.retrieve_private_key() {
                Ok(Some(handle)) => KeyResolution::Found(handle),
                Ok(None) => KeyResolution::Failed(ResolutionFailure::Store(
                    StoreStatus::ItemNotFound,
                )),
                Err(status) => KeyResolution::Failed(ResolutionFailure::Store(status)),
            },
            Err(reason) => KeyResolution::Failed(ResolutionFailure::Generation(reason)),
        }
    }

    /// Look the key up by tag. Not found is `Ok(None)`, not an error.
    fn retrieve_private_key(
        &self,
    ) -> std::result::Result<Option<PrivateKeyHandle>, StoreStatus> {
        let query = StoreQuery::key(&self.key_tag, KeyType::Rsa)
            .returning(ReturnShape::Reference)
            .limit(MatchLimit::One);

        let item = match self.store.copy_matching(&query) {
            Ok(items) => items.into_iter().next(),
            Err(StoreStatus::ItemNotFound) => None,
            Err(status) => return Err(status),
        };

        let Some(item) = item else {
            return Ok(None);
        };

        self.engine
            .import_private_key(&self.key_tag, &item.data)
            .map(Some)
            .map_err(|e| {
                tracing::warn!(tag = %self.key_tag, error = %e, "stored key material unreadable");
                StoreStatus::Corrupted
            })
    }

    /// Generate and persist a key. `Ok(None)` means the tag was taken
    /// between the lookup and the insert.
    fn generate_private_key(&self) -> std::result::Result<Option<PrivateKeyHandle>, String> {
        let spec = KeyGenSpec::rsa(&self.key_tag);
        let handle = self
            .engine
            .generate_key_pair(&spec)
            .map_err(|e| e.to_string())?;

        if spec.permanent {
            let der = self
                .engine
                .export_private_key(&handle)
                .map_err(|e| e.to_string())?;
            match self.store.add(&StoreQuery::key(&spec.tag, spec.key_type), &der) {
                Ok(()) => {}
                Err(StoreStatus::DuplicateItem) => {
                    tracing::debug!(tag = %spec.tag, "key persisted concurrently, discarding ours");
                    return Ok(None);
                }
                Err(status) => return Err(format!("could not persist private key: {status}")),
            }
        }

        Ok(Some(handle))
    }
}
