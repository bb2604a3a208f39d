//! Registration domain service.
//!
//! Turns a normalized [`Registration`] into a persisted account with a
//! freshly generated password. The repository's unique constraint on the
//! primary contact email is authoritative; the lookup before insert only
//! avoids hashing a password for a request that is bound to fail.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, PasswordGenerator, PasswordHasher,
    PasswordHasherError, RegistrationCommand, RegistrationReceipt,
};
use crate::domain::{
    AccountId, ContactEmail, DEFAULT_OTHER_NOTES, Error, NewAccount, Registration,
    RegistrationKind, Role,
};

/// Smallest team accepted for a group registration.
pub const MIN_GROUP_MEMBERS: usize = 2;

/// Business-rule failures of the registration use-case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("A group registration needs at least {MIN_GROUP_MEMBERS} members")]
    InvalidGroupSize { count: usize },
    #[error("At least one member is required")]
    NoMembers,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Primary contact email is required")]
    MissingContactEmail,
}

impl From<RegistrationError> for Error {
    fn from(value: RegistrationError) -> Self {
        let message = value.to_string();
        match value {
            RegistrationError::DuplicateEmail => Error::conflict(message),
            RegistrationError::InvalidGroupSize { .. }
            | RegistrationError::NoMembers
            | RegistrationError::MissingContactEmail => Error::invalid_request(message),
        }
    }
}

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateEmail { .. } => RegistrationError::DuplicateEmail.into(),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

/// Registration service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<R, H, G> {
    accounts: Arc<R>,
    hasher: Arc<H>,
    generator: Arc<G>,
}

impl<R, H, G> RegistrationService<R, H, G> {
    pub fn new(accounts: Arc<R>, hasher: Arc<H>, generator: Arc<G>) -> Self {
        Self {
            accounts,
            hasher,
            generator,
        }
    }
}

fn check_group_size(kind: RegistrationKind, count: usize) -> Result<(), RegistrationError> {
    if kind == RegistrationKind::Group && count < MIN_GROUP_MEMBERS {
        return Err(RegistrationError::InvalidGroupSize { count });
    }
    if count == 0 {
        return Err(RegistrationError::NoMembers);
    }
    Ok(())
}

#[async_trait]
impl<R, H, G> RegistrationCommand for RegistrationService<R, H, G>
where
    R: AccountRepository,
    H: PasswordHasher,
    G: PasswordGenerator,
{
    async fn register(&self, registration: Registration) -> Result<RegistrationReceipt, Error> {
        check_group_size(registration.kind(), registration.members().len())?;

        let display_name = registration
            .display_name()
            .ok_or(RegistrationError::NoMembers)?;
        let (kind, group_name, mut project, mut members) = registration.into_parts();
        if kind == RegistrationKind::Solo {
            members.truncate(1);
        }
        let leader = members.first().ok_or(RegistrationError::NoMembers)?;
        let email = ContactEmail::new(&leader.email)
            .map_err(|_| RegistrationError::MissingContactEmail)?;

        if self
            .accounts
            .exists_by_email(&email)
            .await
            .map_err(map_repository_error)?
        {
            warn!(%email, "registration rejected: email already registered");
            return Err(RegistrationError::DuplicateEmail.into());
        }

        if project.other_notes.trim().is_empty() {
            project.other_notes = DEFAULT_OTHER_NOTES.to_owned();
        }

        let password = self.generator.generate();
        let password_hash = self
            .hasher
            .hash(password.expose())
            .await
            .map_err(map_hasher_error)?;

        let member_count = members.len();
        let account = self
            .accounts
            .insert(NewAccount {
                id: AccountId::random(),
                display_name,
                email,
                password_hash,
                role: Role::User,
                kind,
                group_name: match kind {
                    RegistrationKind::Group => group_name,
                    RegistrationKind::Solo => None,
                },
                project,
                members,
            })
            .await
            .map_err(|error| {
                if matches!(error, AccountRepositoryError::DuplicateEmail { .. }) {
                    warn!("registration lost a concurrent insert race on its email");
                }
                map_repository_error(error)
            })?;

        info!(
            account_id = %account.id,
            kind = %account.kind,
            members = member_count,
            "registration created"
        );

        Ok(RegistrationReceipt {
            account_id: account.id,
            display_name: account.display_name,
            role: account.role,
            password,
        })
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
