//! In-memory [`AccountRepository`] for development runs without PostgreSQL.
//!
//! Contents are lost on restart. The uniqueness check and the insert happen
//! under one lock, so concurrent registrations with the same email see
//! exactly one winner.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountCredentials, ContactEmail, NewAccount};

/// Vector-backed account store in insertion order.
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<AccountCredentials>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryAccountRepository {
    /// Empty store stamping `created_at` from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AccountCredentials>>, AccountRepositoryError> {
        self.accounts
            .lock()
            .map_err(|_| AccountRepositoryError::query("account store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut accounts = self.lock()?;
        if accounts
            .iter()
            .any(|stored| stored.account.email == account.email)
        {
            return Err(AccountRepositoryError::duplicate_email(account.email.as_ref()));
        }

        let NewAccount {
            id,
            display_name,
            email,
            password_hash,
            role,
            kind,
            group_name,
            project,
            members,
        } = account;
        let stored = Account {
            id,
            display_name,
            email,
            role,
            kind,
            group_name,
            project,
            members,
            created_at: self.clock.utc(),
        };
        accounts.push(AccountCredentials {
            account: stored.clone(),
            password_hash,
        });
        Ok(stored)
    }

    async fn exists_by_email(&self, email: &ContactEmail) -> Result<bool, AccountRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .any(|stored| &stored.account.email == email))
    }

    async fn find_credentials_by_email(
        &self,
        email: &ContactEmail,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .find(|stored| &stored.account.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .map(|stored| stored.account.clone())
            .collect())
    }
}
