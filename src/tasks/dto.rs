use serde::{Deserialize, Serialize};

use crate::validation::rules;
use crate::validation::{check_rules, Field, FieldErrors, FieldInput, Validate};
use crate::wire::{deserialize_flag, Effort, Id};

/// A task row as the task list endpoint returns it.
///
/// The backend spells actual effort `Actual-effort`; the casing is part of
/// the wire contract and kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "taskId")]
    pub task_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "assigned-name", default)]
    pub assigned_name: String,
    #[serde(rename = "assigned-code", default)]
    pub assigned_code: String,
    #[serde(rename = "estimated-effort", default)]
    pub estimated_effort: Option<Effort>,
    #[serde(rename = "Actual-effort", default)]
    pub actual_effort: Option<Effort>,
    #[serde(rename = "is-approved", default, deserialize_with = "deserialize_flag")]
    pub is_approved: Option<bool>,
    #[serde(default)]
    pub status: String,
}

/// Filter panel of the task list. Blank entries are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskFilter {
    pub name: Option<String>,
    pub status: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_code: Option<String>,
    pub is_approved: Option<bool>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query-string pairs for the set, non-blank entries.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("name", &self.name),
            ("status", &self.status),
            ("assignee-name", &self.assignee_name),
            ("assignee-code", &self.assignee_code),
        ];
        for (key, value) in text {
            if let Some(v) = non_blank(value) {
                pairs.push((key, v));
            }
        }
        if let Some(approved) = self.is_approved {
            pairs.push(("is-approved", approved.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTask {
    #[validate(custom(function = "rules::task_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_effort: Option<Effort>,
}

impl Validate for CreateTask {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_rules(self)
    }
}

impl FieldInput for CreateTask {
    fn set_input(&mut self, field: Field, value: &str) {
        if field == Field::Name {
            self.name = value.to_string();
        }
    }
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "rules::task_name"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "estimated-effort", skip_serializing_if = "Option::is_none")]
    pub estimated_effort: Option<Effort>,
    #[serde(rename = "Actual-effort", skip_serializing_if = "Option::is_none")]
    pub actual_effort: Option<Effort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "is-approved", skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
}

impl Validate for UpdateTask {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_rules(self)
    }
}
