//! User Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        query::{ListQuery, QueryField, ValueKind},
        users::UsersServiceError,
    },
    uuids::TypedUuid,
};

/// User UUID
pub type UserUuid = TypedUuid<User>;

pub const USERNAME_MIN_CHARS: usize = 5;
pub const USERNAME_MAX_CHARS: usize = 14;
pub const PASSWORD_MIN_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role {:?}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "User" => Ok(Self::User),
            "Admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub verified: bool,
    pub activation_code: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Columns the admin user list can filter and sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Username,
    Email,
    Role,
    CreatedAt,
}

impl QueryField for UserField {
    fn column(self) -> &'static str {
        match self {
            Self::Name => "users.name",
            Self::Username => "users.username",
            Self::Email => "users.email",
            Self::Role => "users.role",
            Self::CreatedAt => "users.created_at",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            Self::Name | Self::Username | Self::Email | Self::Role => ValueKind::Text,
            Self::CreatedAt => ValueKind::Timestamp,
        }
    }
}

/// Admin user list query. Deleted accounts are never listed.
pub type UserQuery = ListQuery<UserField>;

/// Account registration data.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Registration {
    /// Check the shape of the submitted fields. Uniqueness is checked by the service.
    pub fn validate(&self) -> Result<(), UsersServiceError> {
        validate_profile(&self.name, &self.username, &self.email)?;

        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(UsersServiceError::PasswordTooShort(PASSWORD_MIN_CHARS));
        }

        if self.password != self.password_confirm {
            return Err(UsersServiceError::PasswordMismatch);
        }

        Ok(())
    }
}

/// Profile Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub username: String,
    pub email: String,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), UsersServiceError> {
        validate_profile(&self.name, &self.username, &self.email)
    }
}

fn validate_profile(name: &str, username: &str, email: &str) -> Result<(), UsersServiceError> {
    if name.trim().is_empty() {
        return Err(UsersServiceError::MissingName);
    }

    let username_chars = username.chars().count();

    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_chars)
        || !username.chars().all(char::is_alphanumeric)
    {
        return Err(UsersServiceError::InvalidUsername(
            USERNAME_MIN_CHARS,
            USERNAME_MAX_CHARS,
        ));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UsersServiceError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: "Sari Dewi".to_string(),
            username: "saridewi".to_string(),
            email: "sari@example.com".to_string(),
            password: "rahasia123".to_string(),
            password_confirm: "rahasia123".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn rejects_short_or_symbolic_usernames() {
        let mut short = registration();
        short.username = "abc".to_string();

        let mut symbolic = registration();
        symbolic.username = "sari_dewi".to_string();

        assert!(matches!(
            short.validate(),
            Err(UsersServiceError::InvalidUsername(5, 14))
        ));
        assert!(matches!(
            symbolic.validate(),
            Err(UsersServiceError::InvalidUsername(5, 14))
        ));
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        let mut mismatched = registration();
        mismatched.password_confirm = "rahasia124".to_string();

        assert!(matches!(
            mismatched.validate(),
            Err(UsersServiceError::PasswordMismatch)
        ));
    }

    #[test]
    fn rejects_short_password() {
        let mut short = registration();
        short.password = "abc".to_string();
        short.password_confirm = "abc".to_string();

        assert!(matches!(
            short.validate(),
            Err(UsersServiceError::PasswordTooShort(6))
        ));
    }

    #[test]
    fn rejects_malformed_email() {
        let mut malformed = registration();
        malformed.email = "sari.example.com".to_string();

        assert!(matches!(
            malformed.validate(),
            Err(UsersServiceError::InvalidEmail)
        ));
    }

    #[test]
    fn debug_output_hides_passwords() {
        let output = format!("{:?}", registration());

        assert!(!output.contains("rahasia123"), "password leaked: {output}");
    }

    #[test]
    fn role_round_trips_through_text() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(Role::User.as_str(), "User");
        assert!("Root".parse::<Role>().is_err());
    }
}
