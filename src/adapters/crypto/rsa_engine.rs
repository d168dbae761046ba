use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey};
use sha2::Sha512;

use crate::core::errors::{Result, SeckitError};
use crate::core::models::key_pair::{
    Algorithm, KeyGenSpec, KeyOperation, PrivateKeyHandle, PublicKeyHandle,
};
use crate::core::models::store_query::KeyType;
use crate::core::traits::crypto_engine::{CryptoEngine, KeyRef};

/// RSA crypto engine backed by the `rsa` crate.
///
/// Private keys are exchanged with the store as PKCS#8 DER.
#[derive(Debug, Default, Clone, Copy)]
pub struct RsaEngine;

impl RsaEngine {
    pub fn new() -> Self {
        Self
    }

    fn padding(algorithm: Algorithm) -> Oaep {
        match algorithm {
            Algorithm::RsaOaepSha512 => Oaep::new::<Sha512>(),
        }
    }
}

impl CryptoEngine for RsaEngine {
    fn generate_key_pair(&self, spec: &KeyGenSpec) -> Result<PrivateKeyHandle> {
        let KeyType::Rsa = spec.key_type;

        let mut rng = rand::thread_rng();
        let key = RsaPrivateKey::new(&mut rng, spec.size_bits).map_err(|e| {
            SeckitError::KeyGenerationError {
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(bits = spec.size_bits, tag = %spec.tag, "generated RSA key pair");
        Ok(PrivateKeyHandle::new(&spec.tag, key))
    }

    fn export_private_key(&self, key: &PrivateKeyHandle) -> Result<Vec<u8>> {
        let der = key.rsa().to_pkcs8_der().map_err(SeckitError::forwarded)?;
        Ok(der.as_bytes().to_vec())
    }

    fn import_private_key(&self, tag: &str, der: &[u8]) -> Result<PrivateKeyHandle> {
        let key = RsaPrivateKey::from_pkcs8_der(der).map_err(SeckitError::forwarded)?;
        Ok(PrivateKeyHandle::new(tag, key))
    }

    fn public_key(&self, key: &PrivateKeyHandle) -> Option<PublicKeyHandle> {
        Some(PublicKeyHandle::new(key.rsa().to_public_key()))
    }

    fn is_algorithm_supported(
        &self,
        key: KeyRef<'_>,
        operation: KeyOperation,
        algorithm: Algorithm,
    ) -> bool {
        let modulus_len = match (key, operation) {
            (KeyRef::Public(k), KeyOperation::Encrypt) => k.rsa().size(),
            (KeyRef::Private(k), KeyOperation::Decrypt) => k.rsa().size(),
            // Public keys cannot decrypt; private keys encrypt via their public half.
            (KeyRef::Private(k), KeyOperation::Encrypt) => k.rsa().size(),
            (KeyRef::Public(_), KeyOperation::Decrypt) => return false,
        };
        // OAEP needs room for two digests plus two bytes.
        modulus_len > 2 * algorithm.digest_len() + 2
    }

    fn encrypt(
        &self,
        key: &PublicKeyHandle,
        algorithm: Algorithm,
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let mut rng = rand::thread_rng();
        key.rsa()
            .encrypt(&mut rng, Self::padding(algorithm), plaintext)
            .map_err(SeckitError::forwarded)
    }

    fn decrypt(
        &self,
        key: &PrivateKeyHandle,
        algorithm: Algorithm,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        key.rsa()
            .decrypt(Self::padding(algorithm), ciphertext)
            .map_err(SeckitError::forwarded)
    }

    fn name(&self) -> &str {
        "rsa"
    }
}
