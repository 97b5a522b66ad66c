use crate::errors::DomainError;
use crate::object_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Core User entity. The password digest never serializes into responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing, default)]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        role: UserRole,
        password_digest: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: object_id::generate(),
            first_name,
            last_name,
            email: email.to_lowercase(),
            role,
            password_digest,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Name cannot be empty".to_string(),
            ));
        }

        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(DomainError::ValidationError(
                "Invalid email format".to_string(),
            ));
        }

        Ok(())
    }
}
