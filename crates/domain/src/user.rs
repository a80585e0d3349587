use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A registered account that owns `CalendarEvent`s and, through
/// them, `Reminder`s. The password is stored only as an argon2 hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    /// Unix timestamp in millis at which this `User` registered
    pub created: i64,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String, created: i64) -> Self {
        Self {
            id: Default::default(),
            username,
            email,
            password_hash,
            is_active: true,
            is_staff: false,
            created,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
