//! Process-wide authentication configuration.
//!
//! Built once at startup and passed by reference to the token service and
//! lockout policy; never ambient global state. The signing secret has no
//! default: starting without one is a fatal condition.
use crate::errors::{AuthError, AuthResult};
use jsonwebtoken::Algorithm;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing/verification key material.
    pub jwt_secret_key: String,
    /// Symmetric signing algorithm; HS256/HS384/HS512 only.
    pub jwt_algorithm: Algorithm,
    pub access_token_ttl_minutes: u64,
    pub max_login_attempts: u32,
}

impl AuthConfig {
    /// Configuration with defaults for everything except the secret.
    pub fn new(jwt_secret_key: impl Into<String>) -> Self {
        Self {
            jwt_secret_key: jwt_secret_key.into(),
            jwt_algorithm: Algorithm::HS256,
            access_token_ttl_minutes: 15,
            max_login_attempts: 5,
        }
    }

    pub fn from_env() -> AuthResult<Self> {
        let jwt_secret_key = std::env::var("WARDEN_JWT_SECRET")
            .map_err(|_| AuthError::ConfigurationMissing("WARDEN_JWT_SECRET"))?;
        if jwt_secret_key.is_empty() {
            return Err(AuthError::ConfigurationMissing("WARDEN_JWT_SECRET"));
        }

        let jwt_algorithm = match std::env::var("WARDEN_JWT_ALGORITHM") {
            Ok(value) => parse_symmetric_algorithm(&value)?,
            Err(_) => Algorithm::HS256,
        };

        let access_token_ttl_minutes = match std::env::var("WARDEN_ACCESS_TOKEN_TTL_MINUTES") {
            Ok(value) => value.parse().map_err(|_| {
                AuthError::ConfigurationInvalid(format!(
                    "WARDEN_ACCESS_TOKEN_TTL_MINUTES: {value}"
                ))
            })?,
            Err(_) => 15,
        };

        let max_login_attempts = match std::env::var("WARDEN_MAX_LOGIN_ATTEMPTS") {
            Ok(value) => value.parse().map_err(|_| {
                AuthError::ConfigurationInvalid(format!("WARDEN_MAX_LOGIN_ATTEMPTS: {value}"))
            })?,
            Err(_) => 5,
        };

        let config = Self {
            jwt_secret_key,
            jwt_algorithm,
            access_token_ttl_minutes,
            max_login_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AuthResult<()> {
        if self.jwt_secret_key.is_empty() {
            return Err(AuthError::ConfigurationMissing("jwt_secret_key"));
        }
        if self.access_token_ttl_minutes == 0 {
            return Err(AuthError::ConfigurationInvalid(
                "access_token_ttl_minutes must be positive".to_string(),
            ));
        }
        if self.max_login_attempts == 0 {
            return Err(AuthError::ConfigurationInvalid(
                "max_login_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Session tokens are symmetric-only; asymmetric algorithms are rejected
/// rather than silently accepted with a shared secret.
fn parse_symmetric_algorithm(value: &str) -> AuthResult<Algorithm> {
    match value {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AuthError::ConfigurationInvalid(format!(
            "unsupported jwt algorithm: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_ttl_minutes, 15);
        assert_eq!(config.max_login_attempts, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn symmetric_algorithms_only() {
        assert!(parse_symmetric_algorithm("HS256").is_ok());
        assert!(parse_symmetric_algorithm("HS384").is_ok());
        assert!(parse_symmetric_algorithm("HS512").is_ok());
        assert!(parse_symmetric_algorithm("RS256").is_err());
        assert!(parse_symmetric_algorithm("EdDSA").is_err());
        assert!(parse_symmetric_algorithm("none").is_err());
    }

    #[test]
    fn validate_rejects_zero_values() {
        let mut config = AuthConfig::new("secret");
        config.access_token_ttl_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = AuthConfig::new("secret");
        config.max_login_attempts = 0;
        assert!(config.validate().is_err());

        let config = AuthConfig::new("");
        assert!(matches!(
            config.validate().unwrap_err(),
            AuthError::ConfigurationMissing(_)
        ));
    }
}
