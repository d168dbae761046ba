pub mod audit_helpers;
pub mod clip;
pub mod credentials;
pub mod decrypt;
pub mod demo;
pub mod encrypt;
pub mod init;
pub mod keys;
pub mod log;
pub mod protect;
