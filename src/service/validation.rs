//! Field presence and format rules for signup, inventory and supplier payloads.

use crate::error::AppError;
use crate::extractors::FormFields;
use regex::Regex;
use std::sync::OnceLock;

/// Minimum password length in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 8;

const ALL_FIELDS_REQUIRED: &str = "All fields are required";

fn contact_pattern() -> &'static Regex {
    static CONTACT: OnceLock<Regex> = OnceLock::new();
    // ASCII only: `\d` would also accept other scripts' digits.
    CONTACT.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("contact pattern is valid"))
}

pub struct RequestValidator;

impl RequestValidator {
    /// Signup rules, checked in order: presence of every field, password length, contact format.
    pub fn validate_signup(
        name: Option<&str>,
        userid: Option<&str>,
        password: Option<&str>,
        email: Option<&str>,
        contact: Option<&str>,
    ) -> Result<(), AppError> {
        let present = |v: Option<&str>| v.map(|s| !s.is_empty()).unwrap_or(false);
        if ![name, userid, password, email, contact]
            .into_iter()
            .all(present)
        {
            return Err(AppError::Validation(ALL_FIELDS_REQUIRED.into()));
        }
        if password.map(|p| p.encode_utf16().count()).unwrap_or(0) < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        if !contact.map(|c| contact_pattern().is_match(c)).unwrap_or(false) {
            return Err(AppError::Validation(
                "Contact number must be exactly 10 digits".into(),
            ));
        }
        Ok(())
    }

    /// Fails with `message` when any of `names` is falsy.
    pub fn require_present(
        fields: &FormFields,
        names: &[&str],
        message: &str,
    ) -> Result<(), AppError> {
        if names.iter().any(|n| fields.is_falsy(n)) {
            return Err(AppError::Validation(message.into()));
        }
        Ok(())
    }

    /// Create-time presence check for inventory: numeric zero counts as missing.
    pub fn require_item_fields(fields: &FormFields, names: &[&str]) -> Result<(), AppError> {
        Self::require_present(fields, names, ALL_FIELDS_REQUIRED)
    }

    pub fn required_text(fields: &FormFields, name: &str) -> Result<String, AppError> {
        fields
            .text(name)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation(ALL_FIELDS_REQUIRED.into()))
    }

    pub fn non_negative_integer(fields: &FormFields, name: &str) -> Result<i64, AppError> {
        let n = fields
            .integer(name)?
            .ok_or_else(|| AppError::Validation(ALL_FIELDS_REQUIRED.into()))?;
        if n < 0 {
            return Err(AppError::Validation(format!(
                "{} must be a non-negative integer",
                name
            )));
        }
        Ok(n)
    }

    pub fn non_negative_number(fields: &FormFields, name: &str) -> Result<f64, AppError> {
        let n = fields
            .number(name)?
            .ok_or_else(|| AppError::Validation(ALL_FIELDS_REQUIRED.into()))?;
        if n < 0.0 {
            return Err(AppError::Validation(format!(
                "{} must be a non-negative number",
                name
            )));
        }
        Ok(n)
    }
}
