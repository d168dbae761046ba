pub mod audit;
pub mod clipboard;
pub mod crypto_engine;
pub mod secure_store;
