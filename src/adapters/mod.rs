pub mod audit;
pub mod clipboard;
pub mod crypto;
pub mod protection;
pub mod secure_store;
