use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::adapters::crypto::local_identity::LocalIdentity;
use crate::adapters::crypto::rsa_engine::RsaEngine;
use crate::adapters::secure_store::file_store::FileStore;
use crate::adapters::secure_store::memory_store::MemoryStore;
use crate::config::app_config::{AppConfig, StoreBackend};
use crate::core::errors::Result;
use crate::core::services::keychain_facade::KeychainFacade;
use crate::core::traits::secure_store::SecureStore;

static SECKIT_HOME: OnceLock<PathBuf> = OnceLock::new();
static STORE_OVERRIDE: OnceLock<StoreBackend> = OnceLock::new();

/// Facade type used by every command.
pub type Facade = KeychainFacade<Box<dyn SecureStore>, RsaEngine>;

/// Initialize the global home directory and optional store override.
/// Without `--home`, falls back to `<data dir>/seckit`, then `.seckit`.
pub fn init(custom_home: Option<&Path>, store: Option<StoreBackend>) {
    let dir = custom_home
        .map(Path::to_path_buf)
        .or_else(|| dirs::data_dir().map(|d| d.join("seckit")))
        .unwrap_or_else(|| PathBuf::from(".seckit"));
    let _ = SECKIT_HOME.set(dir);
    if let Some(backend) = store {
        let _ = STORE_OVERRIDE.set(backend);
    }
}

/// Get the current home directory.
pub fn home() -> &'static Path {
    SECKIT_HOME
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".seckit"))
}

/// Load `config.toml` from the home directory.
pub fn load_config() -> Result<AppConfig> {
    AppConfig::load(home())
}

/// The local identity sealing the store and protected files.
pub fn identity(config: &AppConfig) -> LocalIdentity {
    LocalIdentity::new(home().join(&config.store.identity_file))
}

/// Open the configured secure store, honoring `--store`.
pub fn open_store(config: &AppConfig) -> Result<Box<dyn SecureStore>> {
    let backend = STORE_OVERRIDE
        .get()
        .copied()
        .unwrap_or(config.store.backend);

    let store: Box<dyn SecureStore> = match backend {
        StoreBackend::File => {
            let identity = LocalIdentity::open_or_generate(identity(config).path())?;
            let store = FileStore::new(home().join(&config.store.file), identity);
            tracing::debug!(path = %store.path().display(), "using file store");
            Box::new(store)
        }
        StoreBackend::Memory => Box::new(MemoryStore::new()),
    };
    tracing::debug!(backend = store.name(), home = %home().display(), "opened secure store");
    Ok(store)
}

/// Build the keychain facade for this invocation.
pub fn open_facade(config: &AppConfig) -> Result<Facade> {
    let store = open_store(config)?;
    Ok(KeychainFacade::new(store, RsaEngine::new(), config.keys.tag.clone()))
}
