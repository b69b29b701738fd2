use crate::role::Role;
use crate::store::StoreError;
use thiserror::Error;

/// Failure modes of token verification.
///
/// These are structured values, not exceptions: malformed input, a bad
/// signature, and expiry are expected, frequent conditions. Callers at the
/// session boundary collapse all three into the opaque
/// [`AuthError::Unauthenticated`] so the failure mode is never disclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("token signature mismatch")]
    SignatureMismatch,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Opaque outcome for any token problem at the caller boundary.
    #[error("authentication failed")]
    Unauthenticated,
    #[error("account is locked")]
    AccountLocked,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("role {actual} does not satisfy required role {required}")]
    InsufficientRole { required: Role, actual: Role },
    #[error("invalid lockout transition: {0}")]
    InvalidTransition(&'static str),
    #[error("missing configuration: {0}")]
    ConfigurationMissing(&'static str),
    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        // Deliberately lossy: which of the three verification failures
        // occurred must not leak past the session boundary.
        AuthError::Unauthenticated
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
