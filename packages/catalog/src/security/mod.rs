//! Credential handling.

pub mod credentials;

pub use credentials::{require_credential, SecretString};
