//! Input checks run before any request is sent.
//!
//! Each form reports only the first problem found, in the order the fields
//! appear on screen.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Loose `something@something.something` check used at registration.
#[allow(clippy::expect_used)]
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in Email field")]
    MissingEmail,

    #[error("Please fill in Password field")]
    MissingPassword,

    #[error("Please fill in Confirm Password field")]
    MissingConfirmation,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter both latitude and longitude")]
    MissingCoordinates,

    #[error("Please enter valid numbers for coordinates")]
    InvalidCoordinates,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if self.confirm_password.is_empty() {
            return Err(ValidationError::MissingConfirmation);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        // Counted in UTF-16 units, the way the registration page measured it.
        if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if !EMAIL.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Raw latitude/longitude text as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct CoordinateForm {
    pub lat: String,
    pub lon: String,
}

impl CoordinateForm {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Parse both fields into finite numbers.
    pub fn parse(&self) -> Result<(f64, f64), ValidationError> {
        let lat = self.lat.trim();
        let lon = self.lon.trim();

        if lat.is_empty() || lon.is_empty() {
            return Err(ValidationError::MissingCoordinates);
        }

        match (parse_finite(lat), parse_finite(lon)) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(ValidationError::InvalidCoordinates),
        }
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
