//! In-memory [`AdminSessionStore`]. Sessions do not survive a restart.
//!
//! Expired sessions are purged whenever a new one is recorded, so tokens that
//! are never presented again do not accumulate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::domain::ports::{AdminSessionStore, AdminSessionStoreError};
use crate::domain::{AdminSession, AdminSessionToken};

pub struct InMemoryAdminSessionStore {
    sessions: Mutex<HashMap<AdminSessionToken, AdminSession>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryAdminSessionStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryAdminSessionStore {
    /// Empty store judging expiry against `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<AdminSessionToken, AdminSession>>, AdminSessionStoreError>
    {
        self.sessions
            .lock()
            .map_err(|_| AdminSessionStoreError::unavailable("session store lock poisoned"))
    }
}

#[async_trait]
impl AdminSessionStore for InMemoryAdminSessionStore {
    async fn insert(&self, session: AdminSession) -> Result<(), AdminSessionStoreError> {
        let now = self.clock.utc();
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_expired_at(now));
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, "purged expired admin sessions");
        }
        sessions.insert(session.token, session);
        Ok(())
    }

    async fn find(
        &self,
        token: &AdminSessionToken,
    ) -> Result<Option<AdminSession>, AdminSessionStoreError> {
        Ok(self.lock()?.get(token).copied())
    }

    async fn remove(&self, token: &AdminSessionToken) -> Result<(), AdminSessionStoreError> {
        self.lock()?.remove(token);
        Ok(())
    }
}
