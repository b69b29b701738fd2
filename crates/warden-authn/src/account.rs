//! The account record: one registrable identity in the directory.
//!
//! # Purpose
//! Holds the authentication-relevant state of an identity: credential
//! digest, role, verification flag, and the lockout counters.
//!
//! # Key invariants
//! - `failed_login_attempts` is reset to zero whenever `is_locked` goes
//!   back to false or a login succeeds.
//! - The lockout transition sets the counter and `is_locked` together;
//!   there is no observable state where the counter is at threshold but
//!   the account is still open. Those transitions live in
//!   [`crate::lockout::LockoutPolicy`]; nothing else mutates the pair.
use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub nickname: String,
    pub email: String,
    /// Opaque digest owned by the credential collaborator; never a
    /// plaintext password.
    pub hashed_password: String,
    pub role: Role,
    pub email_verified: bool,
    pub verification_token: Option<String>,
    pub is_professional: bool,
    pub professional_status_updated_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub failed_login_attempts: u32,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New registration: unlocked, unverified, zero failed attempts.
    pub fn new(
        nickname: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            nickname: nickname.into(),
            email: email.into(),
            hashed_password: hashed_password.into(),
            role,
            email_verified: false,
            verification_token: None,
            is_professional: false,
            professional_status_updated_at: None,
            last_login_at: None,
            failed_login_attempts: 0,
            is_locked: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Mark the email verified and drop the pending verification token.
    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.verification_token = None;
    }

    pub fn update_professional_status(&mut self, status: bool, now: DateTime<Utc>) {
        self.is_professional = status;
        self.professional_status_updated_at = Some(now);
    }
}
