//! Admin seed configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

/// Credentials for the administrator account created at startup.
///
/// Seeding happens only when both values are present.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN_SEED")]
pub struct AdminSeedSettings {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AdminSeedSettings {
    /// Email and password when both are configured and non-blank.
    pub fn credentials(&self) -> Option<(&str, Zeroizing<String>)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, Zeroizing::new(password.to_owned())))
    }
}

impl std::fmt::Debug for AdminSeedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeedSettings")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
