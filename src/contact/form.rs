//! Contact form data and validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Lightweight email shape check: something@something.something, no spaces
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Contact form validation errors
///
/// Display strings double as user-facing response messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Name, email, and message are required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,
}

/// A contact form submission
///
/// All fields default to empty so a partial body still deserializes;
/// `validate` is what decides whether the submission is acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Checks required fields and the email shape
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(FormError::MissingFields);
        }

        if !EMAIL_REGEX.is_match(&self.email) {
            return Err(FormError::InvalidEmail);
        }

        Ok(())
    }
}

// ===== Contact Form Tests =====
