//! Credential adapters: password hashing and one-time password generation.

mod argon2_hasher;
mod random_password_generator;

pub use argon2_hasher::Argon2PasswordHasher;
pub use random_password_generator::RandomPasswordGenerator;
