//! Alphanumeric one-time passwords from the thread-local CSPRNG.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::domain::GeneratedPassword;
use crate::domain::ports::{GENERATED_PASSWORD_LENGTH, PasswordGenerator};

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPasswordGenerator;

impl PasswordGenerator for RandomPasswordGenerator {
    fn generate(&self) -> GeneratedPassword {
        let password: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_PASSWORD_LENGTH)
            .map(char::from)
            .collect();
        GeneratedPassword::new(password)
    }
}
