use serde::{Deserialize, Serialize};

use super::Entity;
use crate::validation::{FieldErrors, Validate, MAX_NAME_LENGTH};

/// Stored account. `password` holds the Argon2 digest, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Public shape of a user; the password digest is not part of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for RegisterInput {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("name", self.name.as_deref(), MAX_NAME_LENGTH);
        errors.require_text("lastname", self.lastname.as_deref(), MAX_NAME_LENGTH);
        errors.require_email("email", self.email.as_deref());
        errors.require_password("password", self.password.as_deref());
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for LoginInput {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_email("email", self.email.as_deref());
        if self.password.as_deref().map_or(true, str::is_empty) {
            errors.add("password", "This field is required");
        }
        errors
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
