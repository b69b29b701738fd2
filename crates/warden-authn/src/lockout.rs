//! Failed-attempt lockout state machine.
//!
//! # Purpose
//! Pure decision logic over an account's `(failed_login_attempts,
//! is_locked)` pair. The policy never touches storage; callers apply these
//! transitions inside the store's serialized per-record update so that two
//! concurrent attempts cannot both observe "not yet locked" and both slip
//! past the threshold.
//!
//! # Key invariants
//! - Reaching the threshold locks the account in the same transition as
//!   the increment.
//! - A locked account cannot record a successful login, even with correct
//!   credentials. Unlock is an explicit privileged action only.
use crate::account::Account;
use crate::errors::{AuthError, AuthResult};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Open,
    Locked,
}

/// Lockout policy parameterized by the configured attempt threshold.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    max_attempts: u32,
}

impl LockoutPolicy {
    /// The threshold must be positive; a zero threshold would lock every
    /// account before its first attempt.
    pub fn new(max_attempts: u32) -> AuthResult<Self> {
        if max_attempts == 0 {
            return Err(AuthError::ConfigurationInvalid(
                "max_login_attempts must be positive".to_string(),
            ));
        }
        Ok(Self { max_attempts })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn state(account: &Account) -> LockState {
        if account.is_locked {
            LockState::Locked
        } else {
            LockState::Open
        }
    }

    /// Record a failed credential check. Open accounts only.
    ///
    /// Increments the counter and, if the new count reaches the threshold,
    /// locks the account in the same transition. Returns the resulting
    /// state so callers can log the lockout.
    pub fn record_failure(&self, account: &mut Account) -> AuthResult<LockState> {
        if account.is_locked {
            return Err(AuthError::AccountLocked);
        }
        account.failed_login_attempts += 1;
        if account.failed_login_attempts >= self.max_attempts {
            account.is_locked = true;
        }
        Ok(Self::state(account))
    }

    /// Record a successful credential check. Open accounts only: a locked
    /// account must not authenticate regardless of credentials, and its
    /// counters stay untouched.
    pub fn record_success(&self, account: &mut Account, now: DateTime<Utc>) -> AuthResult<()> {
        if account.is_locked {
            return Err(AuthError::AccountLocked);
        }
        account.failed_login_attempts = 0;
        account.last_login_at = Some(now);
        Ok(())
    }

    /// Privileged unlock. Locked accounts only; resets the counter so the
    /// account returns to a clean open state.
    pub fn administrative_unlock(&self, account: &mut Account) -> AuthResult<()> {
        if !account.is_locked {
            return Err(AuthError::InvalidTransition(
                "administrative unlock on an open account",
            ));
        }
        account.is_locked = false;
        account.failed_login_attempts = 0;
        Ok(())
    }

    /// Privileged lock of an open account, independent of the counter.
    pub fn administrative_lock(&self, account: &mut Account) -> AuthResult<()> {
        if account.is_locked {
            return Err(AuthError::AccountLocked);
        }
        account.is_locked = true;
        Ok(())
    }
}
