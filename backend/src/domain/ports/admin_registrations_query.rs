//! Driving port for the credential-checked admin listing.

use async_trait::async_trait;

use crate::domain::{Account, AdminCredentials, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRegistrationsQuery: Send + Sync {
    /// Verify admin credentials and return every account.
    ///
    /// Unknown email and wrong password fail identically as unauthorized;
    /// a valid non-admin account fails as forbidden.
    async fn list_registrations(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Vec<Account>, Error>;
}
