//! Authentication primitives: signup/login inputs, token claims and the
//! authenticated caller identity.
//!
//! Inbound payload parsing stays outside the domain; these constructors
//! validate string inputs before a handler talks to a port.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{EmailAddress, UserId, UserValidationError, Username};

/// Lifetime of an issued access token, in seconds (five hours).
pub const TOKEN_LIFETIME_SECS: i64 = 5 * 60 * 60;
/// Longest password accepted; bcrypt only reads the first 72 bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Validation failures for signup and login payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    User(UserValidationError),
    EmptyPassword,
    PasswordTooLong { max: usize },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} bytes")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

impl CredentialsValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(
                UserValidationError::EmptyUsername | UserValidationError::UsernameTooLong { .. },
            ) => "username",
            Self::User(_) => "email",
            Self::EmptyPassword | Self::PasswordTooLong { .. } => "password",
        }
    }
}

fn validate_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return Err(CredentialsValidationError::PasswordTooLong {
            max: PASSWORD_MAX_BYTES,
        });
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised (trimmed, lower case).
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use taskboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "pw").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: validate_password(password)?,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated signup request.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignUpDetails {
    /// Construct signup details from raw inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password: validate_password(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignUpDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpDetails")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Signed access token returned after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Claims carried by an access token.
///
/// Timestamps are seconds since the Unix epoch, as JWT registered claims
/// require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id` issued at `issued_at`, expiring after
    /// [`TOKEN_LIFETIME_SECS`].
    pub fn issue(user_id: UserId, email: EmailAddress, issued_at: DateTime<Utc>) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: email.to_string(),
            user_id,
            email,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        }
    }
}

/// Identity of the caller, established from validated claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: UserId,
    email: EmailAddress,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId, email: EmailAddress) -> Self {
        Self { user_id, email }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self::new(claims.user_id, claims.email)
    }
}
