//! Persistence collaborator seam for account records.
//!
//! # Purpose
//! Durable storage of identities is not this crate's concern; this module
//! defines the contract a backend must honor. The load-by-unique-key
//! calls are plain reads. `update_login_state` is the serialization
//! point required by the lockout policy: one atomic read-modify-write
//! scoped to a single account record, so concurrent login attempts can
//! never both observe the same counter value or both slip past the
//! lockout threshold. No cross-account ordering is required.
use crate::account::Account;
use crate::errors::AuthError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation applied to one account under the store's per-record
/// serialization. An `Err` return aborts the update and leaves the
/// stored record untouched.
pub type LoginStateUpdate = Box<dyn FnOnce(&mut Account) -> Result<(), AuthError> + Send>;

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Account>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Account>;

    /// Insert a new registration. Duplicate email or nickname is a
    /// `Conflict`.
    async fn insert(&self, account: Account) -> StoreResult<Account>;

    /// Atomic per-record update of the login state fields
    /// (`failed_login_attempts`, `is_locked`, `last_login_at`).
    ///
    /// Implementations must serialize concurrent updates to the same
    /// record (row lock, compare-and-swap, or equivalent) and must run
    /// `mutate` against the current stored state, not a stale read.
    /// Returns the record as committed.
    async fn update_login_state(
        &self,
        id: Uuid,
        mutate: LoginStateUpdate,
    ) -> Result<Account, AuthError>;
}
