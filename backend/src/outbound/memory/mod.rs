//! Process-local adapters used when no database is configured and for the
//! admin session store.

mod account_repository;
mod admin_session_store;

pub use account_repository::InMemoryAccountRepository;
pub use admin_session_store::InMemoryAdminSessionStore;
