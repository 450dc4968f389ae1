//! Registration and login.

use crate::commands::Out;
use crate::error::Result;
use crate::store::{CredentialStore, PasswordScheme};

/// Registers `username` after checking that both password entries match.
///
/// # Errors
/// - `ErrorType::Validation` if the passwords differ or the username is blank.
/// - `ErrorType::DuplicateUser` if the username is taken.
pub fn register<S>(
    credentials: &CredentialStore<S>,
    username: &str,
    password: &str,
    confirmation: &str,
) -> Result<Out<String>>
where
    S: PasswordScheme,
{
    credentials.register(username, password, confirmation)?;
    Ok(Out::new(
        format!("Registered '{username}'. You can now log in."),
        username.to_string(),
    ))
}

/// Checks `password` for `username` and returns the logged-in username.
///
/// # Errors
/// - `ErrorType::InvalidCredentials` if the username or password is wrong.
pub fn login<S>(
    credentials: &CredentialStore<S>,
    username: &str,
    password: &str,
) -> Result<Out<String>>
where
    S: PasswordScheme,
{
    let user = credentials.authenticate(username, password)?;
    Ok(Out::new(format!("Welcome, {user}!"), user))
}
