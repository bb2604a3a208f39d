//! Driving port for creating registrations.
//!
//! Inbound adapters hand over a normalized [`Registration`] and receive the
//! one-time password in a [`RegistrationReceipt`].

use async_trait::async_trait;

use crate::domain::{AccountId, Error, GeneratedPassword, Registration, Role};

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub account_id: AccountId,
    pub display_name: String,
    pub role: Role,
    /// Plaintext password, returned exactly once.
    pub password: GeneratedPassword,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Create the account for a normalized registration.
    async fn register(&self, registration: Registration) -> Result<RegistrationReceipt, Error>;
}
