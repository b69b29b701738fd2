//! The caller-facing authentication surface.
//!
//! # Purpose
//! Wires the token service, lockout policy, account store, and credential
//! collaborator into the three operations HTTP-facing services consume:
//! issue a session, authenticate a presented token, and run a login
//! attempt through the lockout state machine.
//!
//! # Key invariants
//! - A locked account is rejected before credential verification runs, so
//!   response timing never distinguishes "wrong password" from "locked
//!   but right password".
//! - Every token problem surfaces as the single opaque
//!   [`AuthError::Unauthenticated`]; which verification mode failed is
//!   never disclosed to callers.
//! - Lockout transitions go through the store's atomic per-record update,
//!   never through a load-then-save of stale state.
use crate::account::Account;
use crate::authorize::require_role;
use crate::config::AuthConfig;
use crate::credentials::PasswordScheme;
use crate::errors::{AuthError, AuthResult};
use crate::lockout::LockoutPolicy;
use crate::role::Role;
use crate::store::{AccountStore, StoreError};
use crate::token::TokenService;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct LoginSuccess {
    pub account: Account,
    pub token: String,
}

pub struct SessionService {
    tokens: TokenService,
    policy: LockoutPolicy,
    store: Arc<dyn AccountStore>,
    passwords: Arc<dyn PasswordScheme>,
}

impl SessionService {
    /// Build the service from startup configuration. Fails fast on
    /// missing or invalid configuration; nothing here is recoverable at
    /// request time.
    pub fn new(
        config: &AuthConfig,
        store: Arc<dyn AccountStore>,
        passwords: Arc<dyn PasswordScheme>,
    ) -> AuthResult<Self> {
        config.validate()?;
        Ok(Self {
            tokens: TokenService::new(config)?,
            policy: LockoutPolicy::new(config.max_login_attempts)?,
            store,
            passwords,
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Issue a signed bearer token for an already-authenticated subject.
    pub fn issue_session(&self, subject: &str, role: Role) -> AuthResult<String> {
        self.tokens.issue(subject, role)
    }

    /// Verify a presented token and recover its subject and role.
    ///
    /// Malformed encoding, signature mismatch, and expiry all collapse to
    /// `Unauthenticated` here.
    pub fn authenticate(&self, token: &str) -> AuthResult<(String, Role)> {
        let claims = self.tokens.verify(token)?;
        let role = claims.role()?;
        Ok((claims.sub, role))
    }

    /// Verify a presented token and gate it against a required minimum
    /// role. Fails closed on any verification failure or unknown role.
    pub fn authorize(&self, token: &str, required: Role) -> AuthResult<Role> {
        let claims = self.tokens.verify(token)?;
        require_role(&claims, required)
    }

    /// Register a new identity: hash the credential and persist the
    /// fresh record.
    pub async fn register(
        &self,
        nickname: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AuthResult<Account> {
        let digest = self.passwords.hash(password)?;
        let account = Account::new(nickname, email, digest, role);
        let created = self.store.insert(account).await?;
        info!(email = %created.email, "account registered");
        Ok(created)
    }

    /// Run one login attempt through the lockout state machine.
    pub async fn attempt_login(&self, email: &str, password: &str) -> AuthResult<LoginSuccess> {
        let account = match self.store.find_by_email(email).await {
            Ok(account) => account,
            // Unknown identities look like bad credentials to the caller.
            Err(StoreError::NotFound(_)) => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(err.into()),
        };

        // Locked accounts are rejected before the credential collaborator
        // is consulted.
        if account.is_locked {
            return Err(AuthError::AccountLocked);
        }

        if !self.passwords.verify(password, &account.hashed_password) {
            let policy = self.policy;
            let updated = self
                .store
                .update_login_state(
                    account.id,
                    Box::new(move |record| policy.record_failure(record).map(|_| ())),
                )
                .await?;
            if updated.is_locked {
                warn!(
                    email = %updated.email,
                    attempts = updated.failed_login_attempts,
                    "account locked after repeated credential failures"
                );
            }
            return Err(AuthError::InvalidCredentials);
        }

        let policy = self.policy;
        let now = Utc::now();
        let updated = self
            .store
            .update_login_state(
                account.id,
                Box::new(move |record| policy.record_success(record, now)),
            )
            .await?;
        let token = self.tokens.issue(&updated.email, updated.role)?;
        Ok(LoginSuccess {
            account: updated,
            token,
        })
    }

    /// Privileged unlock. There is no self-service unlock path.
    pub async fn unlock_account(&self, id: Uuid) -> AuthResult<Account> {
        let policy = self.policy;
        let updated = self
            .store
            .update_login_state(
                id,
                Box::new(move |record| policy.administrative_unlock(record)),
            )
            .await?;
        info!(email = %updated.email, "account administratively unlocked");
        Ok(updated)
    }

    /// Privileged lock of an open account.
    pub async fn lock_account(&self, id: Uuid) -> AuthResult<Account> {
        let policy = self.policy;
        let updated = self
            .store
            .update_login_state(
                id,
                Box::new(move |record| policy.administrative_lock(record)),
            )
            .await?;
        warn!(email = %updated.email, "account administratively locked");
        Ok(updated)
    }
}
