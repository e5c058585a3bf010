//! API key handling with secure memory.
//!
//! Uses the `secrecy` crate so the marketplace key never ends up in logs,
//! `Debug` output or error messages.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::{CatalogError, Result};

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value; only at the point it goes on the wire.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Require a credential, naming the variable it should come from.
pub fn require_credential(secret: Option<&SecretString>, name: &str) -> Result<SecretString> {
    secret
        .filter(|s| !s.expose().trim().is_empty())
        .cloned()
        .ok_or_else(|| CatalogError::MissingCredential {
            name: name.to_string(),
        })
}
