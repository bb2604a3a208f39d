//! Port for server-side admin session storage.

use async_trait::async_trait;

use crate::domain::{AdminSession, AdminSessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by admin session stores.
    pub enum AdminSessionStoreError {
        /// The backing store could not be reached.
        Unavailable { message: String } => "admin session store unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminSessionStore: Send + Sync {
    /// Record a freshly issued session.
    async fn insert(&self, session: AdminSession) -> Result<(), AdminSessionStoreError>;

    /// Look up a session by token, expired or not.
    async fn find(
        &self,
        token: &AdminSessionToken,
    ) -> Result<Option<AdminSession>, AdminSessionStoreError>;

    /// Forget a session. Removing an unknown token succeeds.
    async fn remove(&self, token: &AdminSessionToken) -> Result<(), AdminSessionStoreError>;
}
