//! Persisted registration accounts.
//!
//! An account is created once per successful registration and owned by the
//! leader's email. The password hash never leaves the persistence boundary
//! except inside [`AccountCredentials`], which only the admin credential check
//! consumes; [`Account`] itself has no password field.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::registration::{Member, Project, RegistrationKind};

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Binary authorization flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role string is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Validation errors for [`ContactEmail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactEmailError {
    #[error("email must not be empty")]
    Empty,
}

/// Primary contact email, the unique key of an account.
///
/// ## Invariants
/// - Trimmed and lower-cased, so uniqueness is case-insensitive.
/// - Never empty.
///
/// # Examples
/// ```
/// use contest_backend::domain::ContactEmail;
///
/// let email = ContactEmail::new("  Awa@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "awa@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContactEmailError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ContactEmailError::Empty);
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// A registration account as returned to administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub display_name: String,
    pub email: ContactEmail,
    pub role: Role,
    pub kind: RegistrationKind,
    pub group_name: Option<String>,
    pub project: Project,
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Everything needed to insert a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub id: AccountId,
    pub display_name: String,
    pub email: ContactEmail,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub kind: RegistrationKind,
    pub group_name: Option<String>,
    pub project: Project,
    pub members: Vec<Member>,
}

/// An account together with its stored hash, for credential checks only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    pub account: Account,
    pub password_hash: PasswordHash,
}
