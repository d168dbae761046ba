pub mod local_identity;
pub mod rsa_engine;
