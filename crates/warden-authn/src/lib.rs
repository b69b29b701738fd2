//! Warden authn primitives: session tokens, roles, and account lockout.
//!
//! # Purpose
//! Centralizes the authentication core of the Warden user directory:
//! signed bearer-token issuance and verification, the closed role model
//! and its ordering, and the failed-attempt lockout state machine.
//!
//! # How it fits
//! HTTP-facing services call [`SessionService`] to run login attempts and
//! to authenticate and authorize presented tokens. Durable storage and
//! password hashing stay behind the [`AccountStore`] and
//! [`PasswordScheme`] collaborator traits.
//!
//! # Key invariants
//! - Session tokens are symmetric (HS family) only; asymmetric algorithms
//!   are rejected at configuration time.
//! - Token expiry is exclusive on the upper boundary, and all token
//!   failures collapse to one opaque unauthenticated outcome.
//! - Lockout transitions are atomic per account record: the counter
//!   increment and the lock flag change in one serialized update.
//!
//! # Important configuration
//! - The signing secret has no default; startup fails without it.
//! - `max_login_attempts` and the token ttl come from [`AuthConfig`].
//!
//! # Examples
//! ```rust
//! use warden_authn::{AuthConfig, Role, TokenService};
//!
//! let config = AuthConfig::new("example-secret");
//! let tokens = TokenService::new(&config).unwrap();
//! let token = tokens.issue("jane@example.com", Role::Authenticated).unwrap();
//! assert_eq!(tokens.verify(&token).unwrap().role, "AUTHENTICATED");
//! ```
//!
//! # Common pitfalls
//! - Comparing role strings ad hoc instead of going through [`Role`];
//!   unrecognized roles must fail, never default to the lowest privilege.
//! - Applying lockout transitions to a loaded copy and saving it back;
//!   always go through the store's atomic update.

mod account;
mod authorize;
mod config;
mod credentials;
mod errors;
mod lockout;
mod role;
mod session;
mod store;
mod token;

pub use account::Account;
pub use authorize::require_role;
pub use config::AuthConfig;
pub use credentials::{PasswordScheme, Sha256Scheme};
pub use errors::{AuthError, AuthResult, TokenError};
pub use lockout::{LockState, LockoutPolicy};
pub use role::Role;
pub use session::{LoginSuccess, SessionService};
pub use store::{memory, AccountStore, LoginStateUpdate, StoreError, StoreResult};
pub use token::{Claims, TokenService};
