//! Admin query domain service.
//!
//! Runs the single credential check guarding the registration listing:
//! lookup by normalized email, password verification, then the admin role
//! flag. Unknown email and wrong password are indistinguishable to callers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AdminRegistrationsQuery, PasswordHasher,
};
use crate::domain::{Account, AdminCredentials, Error};

/// Access failures of the admin use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdminAccessError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Admin access required")]
    Forbidden,
    #[error("Session expired")]
    SessionExpired,
}

impl From<AdminAccessError> for Error {
    fn from(value: AdminAccessError) -> Self {
        let message = value.to_string();
        match value {
            AdminAccessError::InvalidCredentials | AdminAccessError::SessionExpired => {
                Error::unauthorized(message)
            }
            AdminAccessError::Forbidden => Error::forbidden(message),
        }
    }
}

pub(crate) fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateEmail { email } => {
            Error::internal(format!("unexpected duplicate email on read: {email}"))
        }
    }
}

/// Verify `credentials` and return the matching admin account.
pub(crate) async fn authorize_admin<R, H>(
    accounts: &R,
    hasher: &H,
    credentials: &AdminCredentials,
) -> Result<Account, Error>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    let Some(stored) = accounts
        .find_credentials_by_email(credentials.email())
        .await
        .map_err(map_repository_error)?
    else {
        warn!("admin access denied: unknown email");
        return Err(AdminAccessError::InvalidCredentials.into());
    };

    let verified = hasher
        .verify(credentials.password(), &stored.password_hash)
        .await
        .map_err(|error| Error::internal(format!("password verification failed: {error}")))?;
    if !verified {
        warn!(account_id = %stored.account.id, "admin access denied: wrong password");
        return Err(AdminAccessError::InvalidCredentials.into());
    }

    if !stored.account.is_admin() {
        warn!(account_id = %stored.account.id, "admin access denied: not an admin");
        return Err(AdminAccessError::Forbidden.into());
    }

    Ok(stored.account)
}

/// Service implementing [`AdminRegistrationsQuery`].
#[derive(Clone)]
pub struct AdminQueryService<R, H> {
    accounts: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AdminQueryService<R, H> {
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

#[async_trait]
impl<R, H> AdminRegistrationsQuery for AdminQueryService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn list_registrations(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Vec<Account>, Error> {
        let admin = authorize_admin(self.accounts.as_ref(), self.hasher.as_ref(), credentials).await?;
        let accounts = self
            .accounts
            .list_all()
            .await
            .map_err(map_repository_error)?;
        info!(admin_id = %admin.id, count = accounts.len(), "admin listed registrations");
        Ok(accounts)
    }
}

#[cfg(test)]
#[path = "admin_query_service_tests.rs"]
mod tests;
