//! Field-level validation shared by every request body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_TEXT_LENGTH: usize = 2000;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// One rejected field and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field errors collected from one request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

/// Implemented by every request body before it reaches a repository
pub trait Validate {
    fn validate(&self) -> FieldErrors;
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    /// Present, not blank, and at most `max` characters
    pub fn require_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        match value.map(str::trim) {
            None | Some("") => self.add(field, "This field is required"),
            Some(text) if text.chars().count() > max => {
                self.add(field, format!("Must be at most {} characters", max))
            }
            Some(_) => {}
        }
    }

    /// Absent is fine; present must be at most `max` characters
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(text) = value {
            if text.chars().count() > max {
                self.add(field, format!("Must be at most {} characters", max));
            }
        }
    }

    pub fn require_email(&mut self, field: &str, value: Option<&str>) {
        match value.map(str::trim) {
            None | Some("") => self.add(field, "This field is required"),
            Some(email) if !is_email(email) => self.add(field, "Invalid email format"),
            Some(_) => {}
        }
    }

    pub fn require_password(&mut self, field: &str, value: Option<&str>) {
        match value {
            None | Some("") => self.add(field, "This field is required"),
            Some(password) if password.chars().count() < MIN_PASSWORD_LENGTH => self.add(
                field,
                format!("Must be at least {} characters", MIN_PASSWORD_LENGTH),
            ),
            Some(_) => {}
        }
    }

    pub fn require_non_negative(&mut self, field: &str, value: Option<Decimal>) {
        match value {
            None => self.add(field, "This field is required"),
            Some(amount) if amount.is_sign_negative() && !amount.is_zero() => {
                self.add(field, "Must not be negative")
            }
            Some(_) => {}
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn is_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Treat blank identifiers as absent
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
