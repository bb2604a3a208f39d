//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! One cluster is shared per test binary. Each test gets a fresh database
//! with the embedded migrations applied, so tests never see each other's
//! rows.

use std::time::Duration;

use contest_backend::outbound::persistence::MIGRATIONS;
use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::ClusterHandle;
use uuid::Uuid;

const SHARED_CLUSTER_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt} failed, retrying: {err:?}");
                std::thread::sleep(RETRY_DELAY * attempt);
                attempt += 1;
            }
            Err(err) => return Err(format!("{err:?}")),
        }
    }
}

/// Create an isolated, migrated database and return its URL.
pub fn provision_database() -> Result<String, String> {
    let cluster = shared_cluster()?;
    let name = format!("contest_test_{}", Uuid::new_v4().simple());

    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = PgConnection::establish(&admin_url).map_err(|err| err.to_string())?;
    diesel::sql_query(format!("CREATE DATABASE \"{name}\""))
        .execute(&mut admin)
        .map_err(|err| format!("create database {name}: {err}"))?;

    let url = cluster.connection().database_url(&name);
    let mut conn = PgConnection::establish(&url).map_err(|err| err.to_string())?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migrate {name}: {err}"))?;
    Ok(url)
}
