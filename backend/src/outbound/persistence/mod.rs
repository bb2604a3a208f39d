//! PostgreSQL persistence adapters built on Diesel.
//!
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module; repositories translate them into domain types and map
//! driver failures onto the port's error enum.
//!
//! ```ignore
//! use contest_backend::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/contest")).await?;
//! let accounts = DieselAccountRepository::new(pool);
//! ```

mod diesel_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
