//! In-memory implementation of the account store.
//!
//! # Purpose
//! Implements [`AccountStore`] with a `HashMap` behind a
//! `tokio::sync::Mutex`. It exists for local development and tests;
//! nothing is durable and state is lost on restart.
//!
//! # Consistency
//! The map lock is held across the whole of `update_login_state`, so the
//! read-modify-write of one record is serialized against every other
//! update. That is a coarser lock than a durable backend would use (a row
//! lock per account suffices) but it satisfies the same contract.
use super::{AccountStore, LoginStateUpdate, StoreError, StoreResult};
use crate::account::Account;
use crate::errors::AuthError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryAccounts {
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccounts {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Account> {
        let accounts = self.accounts.lock().await;
        accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Account> {
        let accounts = self.accounts.lock().await;
        accounts
            .values()
            .find(|account| account.email == email)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(email.to_string()))
    }

    async fn insert(&self, account: Account) -> StoreResult<Account> {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&account.id) {
            return Err(StoreError::Conflict(account.id.to_string()));
        }
        let duplicate = accounts
            .values()
            .any(|existing| existing.email == account.email || existing.nickname == account.nickname);
        if duplicate {
            return Err(StoreError::Conflict(account.email.clone()));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_login_state(
        &self,
        id: Uuid,
        mutate: LoginStateUpdate,
    ) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.lock().await;
        let stored = accounts
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Mutate a copy and commit only on success so a rejected
        // transition leaves the stored record untouched.
        let mut updated = stored.clone();
        mutate(&mut updated)?;
        updated.updated_at = Utc::now();
        accounts.insert(id, updated.clone());
        Ok(updated)
    }
}
