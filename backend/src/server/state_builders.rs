//! Wire domain services onto the configured adapters.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use contest_backend::admin_seed::{AdminSeedOutcome, AdminSeedSettings, seed_admin_account};
use contest_backend::domain::ports::AccountRepository;
use contest_backend::domain::{AdminQueryService, AdminSessionService, RegistrationService};
use contest_backend::inbound::http::state::HttpState;
use contest_backend::outbound::memory::{InMemoryAccountRepository, InMemoryAdminSessionStore};
use contest_backend::outbound::persistence::DieselAccountRepository;
use contest_backend::outbound::security::{Argon2PasswordHasher, RandomPasswordGenerator};

use super::ServerConfig;

/// Build handler state, seeding the admin account first when configured.
///
/// Uses PostgreSQL when a pool is present, otherwise the in-memory store.
///
/// # Errors
/// Returns [`std::io::Error`] when admin seeding fails.
pub(crate) async fn build_http_state(
    config: &ServerConfig,
    seed: &AdminSeedSettings,
) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "account store selected");
            wire(Arc::new(DieselAccountRepository::new(pool.clone())), config, seed).await
        }
        None => {
            warn!(
                store = "memory",
                "CONTEST_DATABASE_URL not set; registrations are lost on restart"
            );
            wire(Arc::new(InMemoryAccountRepository::default()), config, seed).await
        }
    }
}

async fn wire<R>(
    accounts: Arc<R>,
    config: &ServerConfig,
    seed: &AdminSeedSettings,
) -> std::io::Result<HttpState>
where
    R: AccountRepository + 'static,
{
    let hasher = Arc::new(Argon2PasswordHasher::default());

    let outcome = seed_admin_account(seed, accounts.as_ref(), hasher.as_ref())
        .await
        .map_err(|err| std::io::Error::other(format!("admin seeding failed: {err}")))?;
    if outcome == AdminSeedOutcome::Created {
        info!("administrator account ready");
    }

    let registrations = RegistrationService::new(
        Arc::clone(&accounts),
        Arc::clone(&hasher),
        Arc::new(RandomPasswordGenerator),
    );
    let admin_query = AdminQueryService::new(Arc::clone(&accounts), Arc::clone(&hasher));
    let admin_sessions = AdminSessionService::new(
        accounts,
        hasher,
        Arc::new(InMemoryAdminSessionStore::default()),
        Arc::new(DefaultClock),
        config.admin_session_ttl,
    );

    Ok(HttpState::new(
        Arc::new(registrations),
        Arc::new(admin_query),
        Arc::new(admin_sessions),
    ))
}
