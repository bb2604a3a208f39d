//! Driving port for expiring admin sessions.
//!
//! Sessions replace resending raw credentials on every dashboard request:
//! the credential check runs once in [`AdminSessions::open`] and later calls
//! present only the token.

use async_trait::async_trait;

use crate::domain::{
    Account, AdminCredentials, AdminSession, AdminSessionToken, Error, RegistrationStats,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminSessions: Send + Sync {
    /// Check credentials and issue a session.
    async fn open(&self, credentials: &AdminCredentials) -> Result<AdminSession, Error>;

    /// List every account for a live session.
    async fn registrations(&self, token: &AdminSessionToken) -> Result<Vec<Account>, Error>;

    /// Aggregate counts for a live session.
    async fn stats(&self, token: &AdminSessionToken) -> Result<RegistrationStats, Error>;

    /// Revoke a session. Idempotent.
    async fn close(&self, token: &AdminSessionToken) -> Result<(), Error>;
}
