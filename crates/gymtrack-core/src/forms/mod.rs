//! Screen-local form drafts and their validation.
//!
//! Validation runs entirely before any request is made; a draft that fails
//! never reaches the API client or the session holder.

mod rules;

use std::fmt;

pub use rules::{
    AVATAR_MAX_BYTES, AVATAR_TOO_LARGE, MIN_PASSWORD_LEN, check_avatar_size, is_valid_email,
};

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    PasswordConfirm,
    OldPassword,
    Avatar,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::PasswordConfirm => "Confirm password",
            Field::OldPassword => "Old password",
            Field::Avatar => "Photo",
        }
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All failed rules of a draft, at most one per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        if self.get(field).is_none() {
            self.errors.push(FieldError::new(field, message));
        }
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Treats empty and whitespace-only input as absent.
fn present(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

/// Only empty input counts as absent; spaces are part of a password.
fn entered(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInDraft {
    pub email: String,
    pub password: String,
}

impl SignInDraft {
    /// # Errors
    /// Returns the field errors when a required field is missing.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if present(&self.email).is_none() {
            errors.push(Field::Email, "Enter your email");
        }
        if self.password.is_empty() {
            errors.push(Field::Password, "Enter your password");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl SignUpDraft {
    /// # Errors
    /// Returns one error per failing field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if present(&self.name).is_none() {
            errors.push(Field::Name, "Enter your name");
        }
        match present(&self.email) {
            None => errors.push(Field::Email, "Enter your email"),
            Some(email) if !is_valid_email(email.trim()) => {
                errors.push(Field::Email, "Invalid email");
            }
            Some(_) => {}
        }
        if self.password.is_empty() {
            errors.push(Field::Password, "Enter a password");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(Field::Password, "The password must have at least 6 characters.");
        }
        if self.password_confirm.is_empty() {
            errors.push(Field::PasswordConfirm, "Confirm the password");
        } else if self.password_confirm != self.password {
            errors.push(Field::PasswordConfirm, "The passwords do not match");
        }
        errors.into_result()
    }
}

/// Profile edit form. Email is shown read-only and not part of the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub old_password: String,
    pub password: String,
    pub password_confirm: String,
}

impl ProfileDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// New password, if the user entered one.
    pub fn new_password(&self) -> Option<&str> {
        entered(&self.password)
    }

    pub fn old_password(&self) -> Option<&str> {
        entered(&self.old_password)
    }

    /// # Errors
    /// Returns one error per failing field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if present(&self.name).is_none() {
            errors.push(Field::Name, "Enter your name");
        }
        let password = self.new_password();
        if let Some(password) = password
            && password.chars().count() < MIN_PASSWORD_LEN
        {
            errors.push(Field::Password, "The password must have at least 6 characters.");
        }
        match (password, entered(&self.password_confirm)) {
            (Some(_), None) => {
                errors.push(Field::PasswordConfirm, "Enter the password confirmation.");
            }
            (password, Some(confirm)) if password != Some(confirm) => {
                errors.push(Field::PasswordConfirm, "The password confirmation does not match.");
            }
            _ => {}
        }
        errors.into_result()
    }
}
