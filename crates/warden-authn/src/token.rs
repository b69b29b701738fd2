//! Signed session token issuance and verification.
//!
//! Tokens are three-part signed JWTs carrying subject, canonical uppercase
//! role, and an absolute expiry. Issuance and verification are pure and
//! stateless apart from the process-wide symmetric secret fixed at
//! startup, so they are safe on any number of concurrent requests.
//!
//! The expiry boundary is exclusive on the upper end: a token with
//! `exp = E` is accepted while `now < E` and rejected at `now >= E`. The
//! expiry check is done here rather than in the JWT library so the clock
//! can be injected and the boundary stays exact.
use crate::config::AuthConfig;
use crate::errors::{AuthError, AuthResult, TokenError};
use crate::role::Role;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Claims embedded and signed inside a session token.
///
/// Produced by [`TokenService::issue`], consumed once per request by the
/// authorization check; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Canonical uppercase role string.
    pub role: String,
    /// Expiry as epoch seconds.
    pub exp: i64,
}

impl Claims {
    /// Parse the embedded role through the closed role set.
    pub fn role(&self) -> AuthResult<Role> {
        self.role.parse()
    }
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build the service from startup configuration.
    ///
    /// An absent secret is a fatal startup condition, never a per-call
    /// error.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.jwt_secret_key.is_empty() {
            return Err(AuthError::ConfigurationMissing("jwt_secret_key"));
        }
        let secret = config.jwt_secret_key.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: config.jwt_algorithm,
            ttl: Duration::from_secs(config.access_token_ttl_minutes * 60),
        })
    }

    pub fn default_ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` with the default ttl, expiring at
    /// now + ttl.
    pub fn issue(&self, subject: &str, role: Role) -> AuthResult<String> {
        self.issue_at(subject, role, now_epoch_seconds(), self.ttl)
    }

    /// Clock-injected issuance: deterministic given identical inputs.
    pub fn issue_at(
        &self,
        subject: &str,
        role: Role,
        now: i64,
        ttl: Duration,
    ) -> AuthResult<String> {
        let claims = Claims {
            sub: subject.to_string(),
            role: role.as_str().to_string(),
            exp: now + ttl.as_secs() as i64,
        };
        let header = Header::new(self.algorithm);
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify signature integrity and expiry against the current clock.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, now_epoch_seconds())
    }

    /// Clock-injected verification.
    ///
    /// Always returns a structured failure for malformed input, a
    /// signature mismatch, or expiry; never panics on attacker-supplied
    /// tokens.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below with the injected clock.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let decoded = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if now >= decoded.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(decoded.claims)
    }
}

pub(crate) fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_secs() as i64
}
