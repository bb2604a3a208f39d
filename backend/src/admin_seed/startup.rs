//! Create the administrator account once at startup.

use thiserror::Error;
use tracing::info;

use crate::admin_seed::config::AdminSeedSettings;
use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, PasswordHasher, PasswordHasherError,
};
use crate::domain::{
    AccountId, ContactEmail, ContactEmailError, NewAccount, Project, RegistrationKind, Role,
};

/// Display name given to the seeded administrator.
pub const ADMIN_DISPLAY_NAME: &str = "Administrateur";

#[derive(Debug, Error)]
pub enum AdminSeedError {
    #[error("invalid admin seed email: {0}")]
    Email(#[from] ContactEmailError),
    #[error("admin seed hashing failed: {0}")]
    Hashing(#[from] PasswordHasherError),
    #[error("admin seed persistence failed: {0}")]
    Repository(#[from] AccountRepositoryError),
}

/// What seeding did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSeedOutcome {
    /// No seed credentials configured.
    Disabled,
    /// An account already owns the seed email; nothing was written.
    AlreadyPresent,
    Created,
}

/// Insert the configured admin account unless its email is taken.
///
/// An existing account is left untouched, including its role and password.
///
/// # Errors
/// Returns [`AdminSeedError`] when hashing or the store fails.
pub async fn seed_admin_account<R, H>(
    settings: &AdminSeedSettings,
    accounts: &R,
    hasher: &H,
) -> Result<AdminSeedOutcome, AdminSeedError>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    let Some((email, password)) = settings.credentials() else {
        info!(reason = "not configured", "admin seeding skipped");
        return Ok(AdminSeedOutcome::Disabled);
    };
    let email = ContactEmail::new(email)?;

    if accounts.exists_by_email(&email).await? {
        info!(email = %email, "admin account already present; seeding skipped");
        return Ok(AdminSeedOutcome::AlreadyPresent);
    }

    let password_hash = hasher.hash(&password).await?;
    let account = NewAccount {
        id: AccountId::random(),
        display_name: ADMIN_DISPLAY_NAME.to_owned(),
        email: email.clone(),
        password_hash,
        role: Role::Admin,
        kind: RegistrationKind::Solo,
        group_name: None,
        project: Project {
            title: ADMIN_DISPLAY_NAME.to_owned(),
            description: "Compte administrateur".to_owned(),
            languages: "None".to_owned(),
            other_notes: "None".to_owned(),
        },
        members: Vec::new(),
    };

    match accounts.insert(account).await {
        Ok(stored) => {
            info!(email = %email, account_id = %stored.id, "admin account seeded");
            Ok(AdminSeedOutcome::Created)
        }
        Err(AccountRepositoryError::DuplicateEmail { .. }) => {
            info!(email = %email, "admin account created concurrently; seeding skipped");
            Ok(AdminSeedOutcome::AlreadyPresent)
        }
        Err(err) => Err(err.into()),
    }
}
