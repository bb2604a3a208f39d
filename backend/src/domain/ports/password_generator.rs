//! Port for one-time registration passwords.

use crate::domain::GeneratedPassword;

/// Number of characters in a generated password.
pub const GENERATED_PASSWORD_LENGTH: usize = 10;

/// Produce opaque printable passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordGenerator: Send + Sync {
    fn generate(&self) -> GeneratedPassword;
}
