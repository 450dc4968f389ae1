//! The username to password credential file.
//!
//! Passwords are compared through a `PasswordScheme`. The only scheme provided, `Plaintext`,
//! stores and compares passwords verbatim. This is weak and is kept only so that existing
//! credential files keep working. A hashing scheme can be plugged in via
//! `CredentialStore::with_scheme` without changing any caller.

use crate::error::{Error, ErrorType, IntoResult, Res, Result};
use crate::utils;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The contents of the credential file: a JSON object of username to stored password.
pub type Credentials = BTreeMap<String, String>;

/// Turns a password into its stored form and checks a supplied password against it.
pub trait PasswordScheme: Debug {
    /// Returns the value to store for `password`.
    fn seal(&self, password: &str) -> String;

    /// Returns true if `supplied` matches the `stored` value.
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

/// Stores passwords as they were typed.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Plaintext;

impl PasswordScheme for Plaintext {
    fn seal(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, stored: &str, supplied: &str) -> bool {
        stored == supplied
    }
}

/// A JSON file mapping usernames to passwords. Every change rewrites the whole file through a
/// temporary file and a rename.
#[derive(Debug, Clone)]
pub struct CredentialStore<S = Plaintext>
where
    S: PasswordScheme,
{
    path: PathBuf,
    scheme: S,
}

impl CredentialStore<Plaintext> {
    /// Opens the store at `path` with the `Plaintext` scheme, creating an empty file if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_scheme(path, Plaintext)
    }
}

impl<S> CredentialStore<S>
where
    S: PasswordScheme,
{
    pub fn with_scheme(path: impl Into<PathBuf>, scheme: S) -> Result<Self> {
        let store = Self {
            path: path.into(),
            scheme,
        };
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with an empty mapping if it does not exist.
    pub fn initialize(&self) -> Result<()> {
        if self.path.is_file() {
            return Ok(());
        }
        debug!("Creating an empty credential file at {}", self.path.display());
        self.save(&Credentials::new()).pub_result(ErrorType::Io)
    }

    /// Returns true if `username` is registered.
    pub fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(username))
    }

    /// Registers `username`.
    ///
    /// # Errors
    /// - `ErrorType::Validation` if `username` is blank or `password` and `confirmation` differ.
    /// - `ErrorType::DuplicateUser` if `username` is already registered.
    ///
    /// In all error cases the file is left as it was.
    pub fn register(&self, username: &str, password: &str, confirmation: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(Error::new(ErrorType::Validation, "The username cannot be blank"));
        }
        if password != confirmation {
            return Err(Error::new(ErrorType::Validation, "The passwords do not match"));
        }

        let mut credentials = self.load()?;
        if credentials.contains_key(username) {
            return Err(Error::new(
                ErrorType::DuplicateUser,
                format!("The username '{username}' is already taken"),
            ));
        }
        credentials.insert(username.to_string(), self.scheme.seal(password));
        self.save(&credentials)
            .context("Unable to save the new user")
            .pub_result(ErrorType::Io)?;
        info!("Registered user {username}");
        Ok(())
    }

    /// Returns `username` if `password` matches its stored credential.
    ///
    /// # Errors
    /// - `ErrorType::InvalidCredentials` if the user is unknown or the password does not match.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String> {
        let credentials = self.load()?;
        match credentials.get(username) {
            Some(stored) if self.scheme.verify(stored, password) => {
                debug!("Authenticated {username}");
                Ok(username.to_string())
            }
            _ => Err(Error::new(
                ErrorType::InvalidCredentials,
                "Invalid username or password",
            )),
        }
    }

    /// Reads the full mapping from disk.
    pub fn load(&self) -> Result<Credentials> {
        utils::deserialize(&self.path)
            .context("Unable to load the credential file")
            .pub_result(ErrorType::Io)
    }

    fn save(&self, credentials: &Credentials) -> Res<()> {
        utils::serialize(&self.path, credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> CredentialStore {
        CredentialStore::open(dir.path().join("users.json")).unwrap()
    }

    #[test]
    fn test_initialize_creates_empty_mapping() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.path().is_file());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.register("alice", "secret", "secret").unwrap();
        store.initialize().unwrap();
        let reopened = CredentialStore::open(store.path()).unwrap();
        assert!(reopened.contains("alice").unwrap());
    }

    #[test]
    fn test_authenticate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"{"alice": "secret"}"#).unwrap();
        let store = CredentialStore::open(&path).unwrap();

        let err = store.authenticate("alice", "wrong").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidCredentials);
        assert_eq!(store.authenticate("alice", "secret").unwrap(), "alice");

        let err = store.authenticate("mallory", "secret").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidCredentials);
    }

    #[test]
    fn test_register_duplicate_leaves_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.register("alice", "secret", "secret").unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let err = store.register("alice", "other", "other").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::DuplicateUser);
        assert_eq!(before, std::fs::read_to_string(store.path()).unwrap());
        assert_eq!(store.authenticate("alice", "secret").unwrap(), "alice");
    }

    #[test]
    fn test_register_password_mismatch() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let err = store.register("bob", "hunter2", "hunter3").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(!store.contains("bob").unwrap());
    }

    #[test]
    fn test_register_blank_username() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let err = store.register("  ", "pw", "pw").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_is_a_json_object() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.register("alice", "secret", "secret").unwrap();
        store.register("bob", "pw", "pw").unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"alice": "secret", "bob": "pw"}));
    }

    /// A scheme that reverses passwords, to show callers do not depend on `Plaintext`.
    #[derive(Debug)]
    struct Reversed;

    impl PasswordScheme for Reversed {
        fn seal(&self, password: &str) -> String {
            password.chars().rev().collect()
        }

        fn verify(&self, stored: &str, supplied: &str) -> bool {
            stored == self.seal(supplied)
        }
    }

    #[test]
    fn test_custom_scheme() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::with_scheme(dir.path().join("users.json"), Reversed).unwrap();
        store.register("carol", "abc", "abc").unwrap();
        assert_eq!(store.load().unwrap().get("carol").unwrap(), "cba");
        assert_eq!(store.authenticate("carol", "abc").unwrap(), "carol");
        assert!(store.authenticate("carol", "cba").is_err());
    }
}
