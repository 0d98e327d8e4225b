//! Form validation for the login and registration screens.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex pattern is valid")
});

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Email address is not valid".to_string());
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    validate_email(email)?;
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    Ok(())
}

/// Checks run before a registration request is sent.
pub fn validate_registration(email: &str, password: &str, confirm_password: &str) -> Result<(), String> {
    if password != confirm_password {
        return Err("Passwords do not match.".to_string());
    }
    validate_login(email, password)
}
