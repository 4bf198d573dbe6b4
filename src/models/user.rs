// src/models/user.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Family name (surname).
    pub family: String,

    /// Given name.
    pub name: String,

    /// Patronymic; empty when the user has none.
    pub patronymic: String,

    /// Unique key for login and password recovery.
    pub email: String,

    /// Salted Argon2 digest.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    /// Salt the digest was computed with.
    #[serde(skip)]
    pub salt: String,
}

impl User {
    /// Display form "Family N.P." used by rosters and result lists.
    pub fn formatted_name(&self) -> String {
        let mut out = self.family.clone();
        if let Some(initial) = self.name.chars().next() {
            out.push(' ');
            out.push(initial);
            out.push('.');
        }
        if let Some(initial) = self.patronymic.chars().next() {
            out.push(initial);
            out.push('.');
        }
        out
    }
}

/// DTO for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Family name must not be empty."))]
    pub family: String,

    #[validate(length(min = 1, max = 100, message = "Given name must not be empty."))]
    pub name: String,

    #[validate(length(max = 100))]
    pub patronymic: String,

    #[validate(email(message = "Email address is not valid."))]
    pub email: String,

    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// DTO for editing name components and email.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Family name must not be empty."))]
    pub family: String,

    #[validate(length(min = 1, max = 100, message = "Given name must not be empty."))]
    pub name: String,

    #[validate(length(max = 100))]
    pub patronymic: String,

    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
}
