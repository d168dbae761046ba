pub mod keychain_facade;
pub mod text_field;
