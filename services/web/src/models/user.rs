//! User model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::non_blank;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
}

impl User {
    /// Upper-cased first letters of the first two parts of the name
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub avatar: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

/// Entry of the JSON user listing
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Fields of the add-user form
#[derive(Debug, Default, Deserialize)]
pub struct AddUserForm {
    pub username: Option<String>,
    pub avatar: Option<String>,
}

impl AddUserForm {
    /// `None` when no username was entered
    pub fn into_new_user(self) -> Option<NewUser> {
        Some(NewUser {
            name: non_blank(self.username)?,
            avatar: non_blank(self.avatar),
        })
    }
}
