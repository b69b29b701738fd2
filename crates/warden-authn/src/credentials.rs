//! Credential collaborator seam.
//!
//! Password hashing is not this core's concern; the directory only needs
//! `hash` and `verify` against an opaque digest. Production deployments
//! plug in a real KDF behind this trait.
use crate::errors::AuthResult;
use sha2::{Digest, Sha256};

pub trait PasswordScheme: Send + Sync {
    fn hash(&self, plaintext: &str) -> AuthResult<String>;
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Unsalted SHA-256 digests for development and tests only. Not a
/// password KDF; do not deploy this against real credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Scheme;

impl PasswordScheme for Sha256Scheme {
    fn hash(&self, plaintext: &str) -> AuthResult<String> {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match self.hash(plaintext) {
            Ok(computed) => computed == digest,
            Err(_) => false,
        }
    }
}
