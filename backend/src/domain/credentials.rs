//! Credential primitives: admin login inputs and generated passwords.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::account::ContactEmail;

/// Domain error returned when admin credential values are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email or password was blank.
    #[error("Email and password required")]
    Missing,
}

/// Validated admin credentials used by the admin query and session services.
///
/// ## Invariants
/// - `email` is a normalized [`ContactEmail`].
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use contest_backend::domain::AdminCredentials;
///
/// let creds = AdminCredentials::try_from_parts(" Admin@Example.com", "pw").unwrap();
/// assert_eq!(creds.email().as_ref(), "admin@example.com");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    email: ContactEmail,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = ContactEmail::new(email).map_err(|_| CredentialsValidationError::Missing)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::Missing);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &ContactEmail {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One-time plaintext password handed back to a new registrant.
///
/// Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedPassword(Zeroizing<String>);

impl GeneratedPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GeneratedPassword(<redacted>)")
    }
}
