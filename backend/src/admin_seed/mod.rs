//! Startup wiring for the administrator seed account.

mod config;
mod startup;

pub use config::AdminSeedSettings;
pub use startup::{ADMIN_DISPLAY_NAME, AdminSeedError, AdminSeedOutcome, seed_admin_account};
