//! Port abstraction for registration account persistence.
//!
//! The store is the authority on primary-email uniqueness: an insert that
//! collides with an existing account must fail with
//! [`AccountRepositoryError::DuplicateEmail`] even when a prior lookup saw no
//! match.

use async_trait::async_trait;

use crate::domain::{Account, AccountCredentials, ContactEmail, NewAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// An account already uses this primary contact email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account and return it with store-assigned fields.
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Whether an account already owns `email`.
    async fn exists_by_email(&self, email: &ContactEmail) -> Result<bool, AccountRepositoryError>;

    /// Fetch an account together with its password hash.
    async fn find_credentials_by_email(
        &self,
        email: &ContactEmail,
    ) -> Result<Option<AccountCredentials>, AccountRepositoryError>;

    /// Every account in creation order.
    async fn list_all(&self) -> Result<Vec<Account>, AccountRepositoryError>;
}
