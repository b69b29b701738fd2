//! Role-gated authorization over verified claims.
//!
//! Fails closed: an unrecognized role string is an authorization failure,
//! never a pass, and callers must only hand this module claims that came
//! out of token verification.
use crate::errors::{AuthError, AuthResult};
use crate::role::Role;
use crate::token::Claims;

/// Check that the verified token's role satisfies a required minimum
/// role. Returns the parsed role on success so callers can log or
/// propagate it.
pub fn require_role(claims: &Claims, required: Role) -> AuthResult<Role> {
    let actual: Role = claims.role.parse()?;
    if actual.satisfies(required) {
        Ok(actual)
    } else {
        Err(AuthError::InsufficientRole { required, actual })
    }
}
