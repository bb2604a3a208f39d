//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`AccountRepository`, `PasswordHasher`, `PasswordGenerator`,
//! `AdminSessionStore`) expose strongly typed errors so adapters map their
//! failures into predictable variants. Driving ports (`RegistrationCommand`,
//! `AdminRegistrationsQuery`, `AdminSessions`) return the transport-agnostic
//! domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod admin_registrations_query;
mod admin_session_store;
mod admin_sessions;
mod password_generator;
mod password_hasher;
mod registration_command;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use admin_registrations_query::MockAdminRegistrationsQuery;
pub use admin_registrations_query::AdminRegistrationsQuery;
#[cfg(test)]
pub use admin_session_store::MockAdminSessionStore;
pub use admin_session_store::{AdminSessionStore, AdminSessionStoreError};
#[cfg(test)]
pub use admin_sessions::MockAdminSessions;
pub use admin_sessions::AdminSessions;
#[cfg(test)]
pub use password_generator::MockPasswordGenerator;
pub use password_generator::{GENERATED_PASSWORD_LENGTH, PasswordGenerator};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{RegistrationCommand, RegistrationReceipt};
