//! The closed set of directory roles and their ordering.
//!
//! # Purpose
//! Roles form a fixed total order (`ANONYMOUS < AUTHENTICATED < MANAGER <
//! ADMIN`). Authorization is "equal or higher rank", never a partial or
//! fuzzy match, and an unrecognized role string is an error rather than a
//! silent downgrade to the lowest privilege.
use crate::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authority level held by an account.
///
/// Stored canonically in uppercase; parsing from external representations
/// is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Anonymous,
    Authenticated,
    Manager,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Anonymous,
        Role::Authenticated,
        Role::Manager,
        Role::Admin,
    ];

    /// Canonical uppercase form embedded in tokens and stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "ANONYMOUS",
            Role::Authenticated => "AUTHENTICATED",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }

    // Explicit ranking so the order is visible in one place.
    fn rank(&self) -> u8 {
        match self {
            Role::Anonymous => 0,
            Role::Authenticated => 1,
            Role::Manager => 2,
            Role::Admin => 3,
        }
    }

    /// Whether this role meets a required minimum role.
    ///
    /// Satisfaction is equality or a higher position in the fixed order.
    pub fn satisfies(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Total membership check over the closed role set.
    pub fn is_valid(input: &str) -> bool {
        input.parse::<Role>().is_ok()
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_uppercase().as_str() {
            "ANONYMOUS" => Ok(Role::Anonymous),
            "AUTHENTICATED" => Ok(Role::Authenticated),
            "MANAGER" => Ok(Role::Manager),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(AuthError::UnknownRole(input.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_total_and_fixed() {
        assert!(Role::Admin.satisfies(Role::Manager));
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Manager.satisfies(Role::Authenticated));
        assert!(!Role::Authenticated.satisfies(Role::Manager));
        assert!(!Role::Anonymous.satisfies(Role::Authenticated));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("authenticated".parse::<Role>().unwrap(), Role::Authenticated);
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("MANAGER".parse::<Role>().unwrap(), Role::Manager);
    }

    #[test]
    fn unknown_role_is_an_error_not_a_default() {
        let err = "SUPERUSER".parse::<Role>().unwrap_err();
        assert!(matches!(err, AuthError::UnknownRole(_)));
        assert!(!Role::is_valid("guest"));
        assert!(Role::is_valid("anonymous"));
    }

    #[test]
    fn canonical_form_is_uppercase() {
        for role in Role::ALL {
            assert_eq!(role.as_str(), role.as_str().to_ascii_uppercase());
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn serde_round_trip_uses_canonical_strings() {
        let encoded = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(encoded, "\"MANAGER\"");
        let decoded: Role = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, Role::Manager);
    }
}
