//! Field-level validation shared by every request schema.
//!
//! Schemas declare their rules with `#[derive(validator::Validate)]` and
//! implement [`Validate`] on top, which reports failures as [`FieldErrors`]
//! keyed by the backend's field names. `validate_field` is run on every
//! change; `validate` re-checks everything and is the only thing allowed to
//! block a submission.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};
use tracing::warn;
use validator::ValidationErrors;

pub mod messages;
pub mod rules;

/// Form field names, spelled as the backend spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "confirmPassword")]
    ConfirmPassword,
    #[serde(rename = "user-name")]
    UserName,
    #[serde(rename = "student-code")]
    StudentCode,
    #[serde(rename = "phone-number")]
    PhoneNumber,
    #[serde(rename = "date-of-birth")]
    DateOfBirth,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "avatar")]
    Avatar,
    #[serde(rename = "role")]
    Role,
    #[serde(rename = "name")]
    Name,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::UserName => "user-name",
            Field::StudentCode => "student-code",
            Field::PhoneNumber => "phone-number",
            Field::DateOfBirth => "date-of-birth",
            Field::Address => "address",
            Field::Gender => "gender",
            Field::Avatar => "avatar",
            Field::Role => "role",
            Field::Name => "name",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        let field = match name {
            "email" => Field::Email,
            "password" => Field::Password,
            "confirmPassword" => Field::ConfirmPassword,
            "user-name" => Field::UserName,
            "student-code" => Field::StudentCode,
            "phone-number" => Field::PhoneNumber,
            "date-of-birth" => Field::DateOfBirth,
            "address" => Field::Address,
            "gender" => Field::Gender,
            "avatar" => Field::Avatar,
            "role" => Field::Role,
            "name" => Field::Name,
            _ => return None,
        };
        Some(field)
    }

    /// Accepts either the wire name or the Rust field name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::from_wire(key).or(match key {
            "confirm_password" => Some(Field::ConfirmPassword),
            "user_name" => Some(Field::UserName),
            "student_code" => Some(Field::StudentCode),
            "phone_number" => Some(Field::PhoneNumber),
            "date_of_birth" => Some(Field::DateOfBirth),
            _ => None,
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name → user-facing message. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Sets or clears a single field's message.
    pub fn set(&mut self, field: Field, message: Option<String>) {
        match message {
            Some(m) => {
                self.0.insert(field, m);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Copy of `self` with one field replaced.
    pub fn with(&self, field: Field, message: Option<String>) -> Self {
        let mut next = self.clone();
        next.set(field, message);
        next
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A request schema whose rules are declared with `validator` attributes.
pub trait Validate {
    /// Exhaustive pass: every rule on every field.
    fn validate(&self) -> Result<(), FieldErrors>;

    /// Message for `field` if its current value is invalid.
    fn validate_field(&self, field: Field) -> Option<String> {
        self.validate()
            .err()
            .and_then(|errors| errors.get(field).map(str::to_string))
    }

    /// Fields whose rules read `field` and must be re-checked when it changes.
    fn dependents(&self, _field: Field) -> &'static [Field] {
        &[]
    }
}

/// Runs the derived rules of `value` and keys the failures by wire name.
pub fn check_rules<T: validator::Validate>(value: &T) -> Result<(), FieldErrors> {
    match validator::Validate::validate(value) {
        Ok(()) => Ok(()),
        Err(report) => FieldErrors::from(report).into_result(),
    }
}

impl From<ValidationErrors> for FieldErrors {
    /// One message per field. A `must_match` failure outranks the other rules
    /// on the same field.
    fn from(report: ValidationErrors) -> Self {
        let mut errors = FieldErrors::new();
        for (key, failures) in report.field_errors() {
            let Some(field) = Field::from_key(&key) else {
                warn!(field = %key, "validation failure on an unmapped field");
                continue;
            };
            let chosen = failures
                .iter()
                .find(|f| f.code == "must_match")
                .or_else(|| failures.first());
            if let Some(failure) = chosen {
                let message = match &failure.message {
                    Some(message) => message.to_string(),
                    None => failure.code.to_string(),
                };
                errors.insert(field, message);
            }
        }
        errors
    }
}

/// Lets headless forms write raw text input into a schema.
pub trait FieldInput {
    fn set_input(&mut self, field: Field, value: &str);
}

pub fn is_valid_email(email: &str) -> bool {
    rules::EMAIL_RE.is_match(email)
}

/// Parses a date of birth typed as `YYYY-MM-DD` or picked as `DD/MM/YYYY`.
pub fn parse_date(value: &str) -> Option<Date> {
    let value = value.trim();
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(value, format_description!("[day]/[month]/[year]")))
        .ok()
}

pub fn format_date(date: Date) -> String {
    // Only fails for years outside 0..=9999, which `parse_date` never yields.
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use validator::ValidationError;

    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("intern.one@fpt.edu.vn"));
        for bad in ["", "a", "a@b", "@b.co", "a@.co", "a b@c.de", "a@b.c o", "a@@b.co"] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn date_of_birth_accepts_both_formats() {
        let iso = parse_date("2002-03-09").unwrap();
        let picked = parse_date("09/03/2002").unwrap();
        assert_eq!(iso, picked);
        assert_eq!(format_date(picked), "2002-03-09");
        assert!(parse_date("2002-02-30").is_none());
    }

    fn failure(code: &'static str, message: &'static str) -> ValidationError {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Borrowed(message));
        err
    }

    #[test]
    fn report_maps_rust_names_to_wire_fields() {
        let mut report = ValidationErrors::new();
        report.add("user_name", failure("length", messages::USER_NAME_TOO_SHORT));
        report.add("email", failure("regex", messages::EMAIL_INVALID));
        let errors = FieldErrors::from(report);
        assert_eq!(errors.get(Field::UserName), Some(messages::USER_NAME_TOO_SHORT));
        assert_eq!(errors.get(Field::Email), Some(messages::EMAIL_INVALID));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn mismatch_outranks_other_rules_on_a_field() {
        let mut report = ValidationErrors::new();
        report.add("confirm_password", failure("length", messages::PASSWORD_TOO_SHORT));
        report.add("confirm_password", failure("must_match", messages::PASSWORD_MISMATCH));
        let errors = FieldErrors::from(report);
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some(messages::PASSWORD_MISMATCH)
        );
    }

    #[test]
    fn failure_without_message_falls_back_to_code() {
        let mut report = ValidationErrors::new();
        report.add("role", ValidationError::new("required"));
        assert_eq!(FieldErrors::from(report).get(Field::Role), Some("required"));
    }

    #[test]
    fn field_errors_serialize_with_wire_names() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::PhoneNumber, "bad");
        errors.insert(Field::ConfirmPassword, "mismatch");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["phone-number"], "bad");
        assert_eq!(json["confirmPassword"], "mismatch");
    }

    #[test]
    fn field_round_trips_through_wire_name() {
        for field in [Field::Email, Field::UserName, Field::StudentCode, Field::DateOfBirth] {
            assert_eq!(Field::from_wire(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_wire("nickname"), None);
        assert_eq!(Field::from_key("phone_number"), Some(Field::PhoneNumber));
        assert_eq!(Field::from_key("nickname"), None);
    }
}
