//! Unit tests for session configuration parsing.

use std::collections::HashMap;

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use uuid::Uuid;

struct KeyFile(PathBuf);

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("contest-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self(path)
    }

    fn path(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_env(key: &KeyFile, overrides: &[(&'static str, &'static str)]) -> MockEnv {
    let path = key.path();
    let mut vars: Vec<(&str, &str)> = vec![
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ];
    for (name, value) in overrides {
        vars.retain(|(existing, _)| existing != name);
        vars.push((*name, *value));
    }
    vars.push((KEY_FILE_ENV, path.as_str()));
    env_with(&vars)
}

#[rstest]
fn release_accepts_complete_configuration() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let settings = session_settings_from_env(&release_env(&key, &[]), BuildMode::Release)
        .expect("valid release configuration");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(#[case] missing: &'static str) {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let path = key.path();
    let vars: Vec<(&str, &str)> = [
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
        (KEY_FILE_ENV, path.as_str()),
    ]
    .into_iter()
    .filter(|(name, _)| *name != missing)
    .collect();

    let result = session_settings_from_env(&env_with(&vars), BuildMode::Release);

    assert!(matches!(
        result,
        Err(SessionConfigError::MissingEnv { name }) if name == missing
    ));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
fn release_rejects_malformed_toggles(#[case] name: &'static str, #[case] value: &'static str) {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let result = session_settings_from_env(&release_env(&key, &[(name, value)]), BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::InvalidEnv { name: reported, .. }) if reported == name
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookie() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let env = release_env(&key, &[(COOKIE_SECURE_ENV, "0"), (SAMESITE_ENV, "None")]);
    assert!(matches!(
        session_settings_from_env(&env, BuildMode::Release),
        Err(SessionConfigError::InsecureSameSiteNone)
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let env = release_env(&key, &[(ALLOW_EPHEMERAL_ENV, "yes")]);
    assert!(matches!(
        session_settings_from_env(&env, BuildMode::Release),
        Err(SessionConfigError::EphemeralNotAllowed)
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN - 1);
    let result = session_settings_from_env(&release_env(&key, &[]), BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::KeyTooShort { length, .. }) if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_missing_key_file() {
    let env = env_with(&[
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
        (KEY_FILE_ENV, "/nonexistent/contest/session_key"),
    ]);
    assert!(matches!(
        session_settings_from_env(&env, BuildMode::Release),
        Err(SessionConfigError::KeyRead { .. })
    ));
}

#[rstest]
fn debug_defaults_to_secure_lax_cookies() {
    let env = env_with(&[(KEY_FILE_ENV, "/nonexistent/contest/session_key")]);
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug tolerates defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_short_keys_and_bad_values() {
    let key = KeyFile::with_len(8);
    let path = key.path();
    let env = env_with(&[
        (KEY_FILE_ENV, path.as_str()),
        (COOKIE_SECURE_ENV, "perhaps"),
        (SAMESITE_ENV, "None"),
    ]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::None);
}

#[rstest]
fn key_file_material_is_stable() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let first = session_settings_from_env(&release_env(&key, &[]), BuildMode::Release)
        .expect("first load");
    let second = session_settings_from_env(&release_env(&key, &[]), BuildMode::Release)
        .expect("second load");
    assert_eq!(first.key.master(), second.key.master());
}
