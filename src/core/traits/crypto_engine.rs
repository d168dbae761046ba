use crate::core::errors::Result;
use crate::core::models::key_pair::{
    Algorithm, KeyGenSpec, KeyOperation, PrivateKeyHandle, PublicKeyHandle,
};

/// Either half of a key pair, for capability checks.
#[derive(Debug, Clone, Copy)]
pub enum KeyRef<'a> {
    Private(&'a PrivateKeyHandle),
    Public(&'a PublicKeyHandle),
}

/// Port for the asymmetric crypto engine.
///
/// The engine never touches the secure store; persisting generated keys
/// is the caller's job.
pub trait CryptoEngine: Send + Sync {
    /// Generate a fresh key pair described by `spec`.
    fn generate_key_pair(&self, spec: &KeyGenSpec) -> Result<PrivateKeyHandle>;

    /// Serialize a private key for storage.
    fn export_private_key(&self, key: &PrivateKeyHandle) -> Result<Vec<u8>>;

    /// Rebuild a private key handle from stored bytes.
    fn import_private_key(&self, tag: &str, der: &[u8]) -> Result<PrivateKeyHandle>;

    /// Derive the public half. `None` if the key cannot produce one.
    fn public_key(&self, key: &PrivateKeyHandle) -> Option<PublicKeyHandle>;

    fn is_algorithm_supported(
        &self,
        key: KeyRef<'_>,
        operation: KeyOperation,
        algorithm: Algorithm,
    ) -> bool;

    fn encrypt(
        &self,
        key: &PublicKeyHandle,
        algorithm: Algorithm,
        plaintext: &[u8],
    ) -> Result<Vec<u8>>;

    fn decrypt(
        &self,
        key: &PrivateKeyHandle,
        algorithm: Algorithm,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Human-readable name of this engine.
    fn name(&self) -> &str;
}
