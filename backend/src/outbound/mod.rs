//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL account store via Diesel
//! - **memory**: process-local account and admin session stores
//! - **security**: Argon2 password hashing and one-time password generation

pub mod memory;
pub mod persistence;
pub mod security;
