//! Backend entry-point: loads configuration, prepares the account store and
//! serves the registration API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use std::ffi::OsString;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contest_backend::admin_seed::AdminSeedSettings;
use contest_backend::inbound::http::health::HealthState;
use contest_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use contest_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use contest_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use ortho_config::OrthoConfig;
use server::{ServerConfig, ServerSettings, build_http_state, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let settings = ServerSettings::from_env()?;
    let seed = AdminSeedSettings::load_from_iter([OsString::from("contest-backend")])
        .map_err(|err| eyre!("load admin seed settings: {err}"))?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let bind_addr = settings.bind_addr().wrap_err("CONTEST_BIND_ADDR")?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_admin_session_ttl(settings.admin_session_ttl());

    if let Some(url) = settings.database_url() {
        run_migrations(url).await.wrap_err("database migrations")?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
            .await
            .wrap_err("database pool")?;
        config = config.with_db_pool(pool);
    }

    let http_state = build_http_state(&config, &seed).await?;
    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, http_state, config)?.await?;
    Ok(())
}
