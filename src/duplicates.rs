//! Turns the backend's "duplicate data" log line into field errors.
//!
//! The backend reports unique-constraint violations as free text, e.g.
//! `insert intern: duplicate data [email, phone-number]`. Only the first
//! bracketed span is considered.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::ErrorEnvelope;
use crate::validation::{messages, Field, FieldErrors};

pub const DUPLICATE_MARKER: &str = "duplicate data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateFields {
    /// Known field names from the bracketed list. May be empty when every
    /// listed name was unknown.
    Recognized(BTreeSet<Field>),
    Unparseable,
}

/// Fields that have a dedicated "already exists" message.
pub fn duplicate_message(field: Field) -> Option<&'static str> {
    match field {
        Field::Email => Some(messages::EMAIL_TAKEN),
        Field::PhoneNumber => Some(messages::PHONE_NUMBER_TAKEN),
        Field::UserName => Some(messages::USER_NAME_TAKEN),
        Field::StudentCode => Some(messages::STUDENT_CODE_TAKEN),
        _ => None,
    }
}

pub fn is_duplicate_log(log: &str) -> bool {
    log.contains(DUPLICATE_MARKER)
}

pub fn parse_duplicate_log(log: &str) -> DuplicateFields {
    lazy_static! {
        static ref BRACKETED: Regex = Regex::new(r"\[(.*?)\]").unwrap();
    }
    let Some(list) = BRACKETED.captures(log).and_then(|c| c.get(1)) else {
        return DuplicateFields::Unparseable;
    };
    let fields = list
        .as_str()
        .split(',')
        .map(str::trim)
        .filter_map(Field::from_wire)
        .filter(|f| duplicate_message(*f).is_some())
        .collect();
    DuplicateFields::Recognized(fields)
}

/// Field errors and the notice to show after a failed create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub errors: FieldErrors,
    /// Generic message to show when nothing could be pinned to a field.
    pub notice: Option<String>,
}

pub fn generic_message(envelope: &ErrorEnvelope) -> String {
    if envelope.message.trim().is_empty() {
        messages::GENERIC_FAILURE.to_string()
    } else {
        envelope.message.clone()
    }
}

/// Applies a server error envelope on top of the current field errors.
/// Fields not named by the server keep whatever message they had.
pub fn reconcile(current: &FieldErrors, envelope: &ErrorEnvelope) -> Reconciliation {
    let log = envelope.log();
    let parsed = if is_duplicate_log(log) {
        parse_duplicate_log(log)
    } else {
        DuplicateFields::Unparseable
    };

    match parsed {
        DuplicateFields::Recognized(fields) if !fields.is_empty() => {
            let mut errors = current.clone();
            for field in fields {
                errors.set(field, duplicate_message(field).map(str::to_string));
            }
            debug!(fields = %errors, "duplicate fields reconciled");
            Reconciliation {
                errors,
                notice: None,
            }
        }
        _ => Reconciliation {
            errors: current.clone(),
            notice: Some(generic_message(envelope)),
        },
    }
}
