use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A stored user record, including the password hash
#[derive(Clone, FromRow, PartialEq)]
pub(crate) struct User {
    /// Unique user identifier
    pub id: String,
    /// Login name, unique across users
    pub username: String,
    /// PHC-format password hash
    pub password_hash: String,
    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(username: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

// The hash stays out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The public projection of a user handed to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum UserSearchField {
    Id(String),
    Username(String),
}

impl fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "id={id}"),
            UserSearchField::Username(username) => write!(f, "username={username}"),
        }
    }
}
