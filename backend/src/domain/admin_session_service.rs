//! Admin session domain service.
//!
//! Issues expiring server-side sessions after the admin credential check and
//! serves the dashboard reads against a live session token.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::admin_query_service::{AdminAccessError, authorize_admin, map_repository_error};
use crate::domain::ports::{
    AccountRepository, AdminSessionStore, AdminSessionStoreError, AdminSessions, PasswordHasher,
};
use crate::domain::{
    Account, AdminCredentials, AdminSession, AdminSessionToken, Error, RegistrationStats,
};

/// Session lifetime used when configuration does not override it.
pub const DEFAULT_ADMIN_SESSION_TTL_MINUTES: i64 = 120;

fn map_store_error(error: AdminSessionStoreError) -> Error {
    match error {
        AdminSessionStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("admin session store unavailable: {message}"))
        }
    }
}

/// Service implementing [`AdminSessions`].
#[derive(Clone)]
pub struct AdminSessionService<R, H, S> {
    accounts: Arc<R>,
    hasher: Arc<H>,
    sessions: Arc<S>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<R, H, S> AdminSessionService<R, H, S> {
    pub fn new(
        accounts: Arc<R>,
        hasher: Arc<H>,
        sessions: Arc<S>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            accounts,
            hasher,
            sessions,
            clock,
            ttl,
        }
    }
}

impl<R, H, S> AdminSessionService<R, H, S>
where
    R: AccountRepository,
    H: PasswordHasher,
    S: AdminSessionStore,
{
    /// Resolve a token to a live session, evicting it once expired.
    async fn live_session(&self, token: &AdminSessionToken) -> Result<AdminSession, Error> {
        let Some(session) = self.sessions.find(token).await.map_err(map_store_error)? else {
            return Err(AdminAccessError::SessionExpired.into());
        };
        if session.is_expired_at(self.clock.utc()) {
            debug!("evicting expired admin session");
            self.sessions.remove(token).await.map_err(map_store_error)?;
            return Err(AdminAccessError::SessionExpired.into());
        }
        Ok(session)
    }

    async fn all_accounts(&self) -> Result<Vec<Account>, Error> {
        self.accounts.list_all().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R, H, S> AdminSessions for AdminSessionService<R, H, S>
where
    R: AccountRepository,
    H: PasswordHasher,
    S: AdminSessionStore,
{
    async fn open(&self, credentials: &AdminCredentials) -> Result<AdminSession, Error> {
        let admin = authorize_admin(self.accounts.as_ref(), self.hasher.as_ref(), credentials).await?;
        let session = AdminSession {
            token: AdminSessionToken::random(),
            expires_at: self.clock.utc() + self.ttl,
        };
        self.sessions
            .insert(session)
            .await
            .map_err(map_store_error)?;
        info!(admin_id = %admin.id, expires_at = %session.expires_at, "admin session opened");
        Ok(session)
    }

    async fn registrations(&self, token: &AdminSessionToken) -> Result<Vec<Account>, Error> {
        self.live_session(token).await?;
        self.all_accounts().await
    }

    async fn stats(&self, token: &AdminSessionToken) -> Result<RegistrationStats, Error> {
        self.live_session(token).await?;
        let accounts = self.all_accounts().await?;
        Ok(RegistrationStats::from_accounts(&accounts))
    }

    async fn close(&self, token: &AdminSessionToken) -> Result<(), Error> {
        self.sessions.remove(token).await.map_err(map_store_error)?;
        info!("admin session closed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "admin_session_service_tests.rs"]
mod tests;
