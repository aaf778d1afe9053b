//! Custom rules plugged into `#[validate(custom(..))]` where a built-in
//! validator cannot carry the message the form needs.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use super::{messages, parse_date};

lazy_static! {
    pub static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

fn fail(code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    Err(err)
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return fail("required", message);
    }
    Ok(())
}

/// Auth passwords have a floor and a ceiling, each with its own message.
pub fn password_bounds(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < messages::PASSWORD_MIN {
        return fail("length", messages::PASSWORD_TOO_SHORT);
    }
    if len > messages::PASSWORD_MAX {
        return fail("length", messages::PASSWORD_TOO_LONG);
    }
    Ok(())
}

pub fn date_of_birth(value: &str) -> Result<(), ValidationError> {
    required(value, messages::DATE_OF_BIRTH_REQUIRED)?;
    match parse_date(value) {
        Some(_) => Ok(()),
        None => fail("date", messages::DATE_OF_BIRTH_INVALID),
    }
}

pub fn address(value: &str) -> Result<(), ValidationError> {
    required(value, messages::ADDRESS_REQUIRED)
}

pub fn role(value: &str) -> Result<(), ValidationError> {
    required(value, messages::ROLE_REQUIRED)
}

pub fn task_name(value: &str) -> Result<(), ValidationError> {
    required(value, messages::TASK_NAME_REQUIRED)
}
