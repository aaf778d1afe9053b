use serde::{Deserialize, Serialize};

use crate::validation::rules::{self, EMAIL_RE};
use crate::validation::{check_rules, Field, FieldErrors, FieldInput, Validate};
use crate::wire::Id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: Id,
    #[serde(rename = "user-name")]
    pub user_name: String,
    #[serde(rename = "student-code", default)]
    pub student_code: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(rename = "ojt-semester-university", default)]
    pub ojt_semester_university: String,
    #[serde(default)]
    pub technical_skills: String,
}

/// Members currently in a project; this endpoint is not paged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberList {
    pub data: Vec<ProjectMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MemberNotInProjectFilter {
    pub user_name: Option<String>,
    pub student_code: Option<String>,
    pub role: Option<String>,
    pub semester: Option<String>,
    pub university: Option<String>,
}

impl MemberNotInProjectFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("user-name", &self.user_name),
            ("student-code", &self.student_code),
            ("role", &self.role),
            ("semester", &self.semester),
            ("university", &self.university),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let v = value.as_deref()?.trim();
            (!v.is_empty()).then(|| (key, v.to_string()))
        })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AddProjectMember {
    pub member_id: Id,
}

/// Request body for creating a member account (mentor, intern, manager).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, validator::Validate)]
pub struct AddMember {
    #[validate(regex(path = *EMAIL_RE, message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(custom(function = "rules::role"))]
    pub role: String,
    #[serde(rename = "user-name")]
    #[validate(length(min = 4, message = "Username must be at least 4 characters"))]
    pub user_name: String,
}

impl Validate for AddMember {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_rules(self)
    }
}

impl FieldInput for AddMember {
    fn set_input(&mut self, field: Field, value: &str) {
        match field {
            Field::UserName => self.user_name = value.to_string(),
            Field::Email => self.email = value.to_string(),
            Field::Password => self.password = value.to_string(),
            Field::Role => self.role = value.to_string(),
            _ => {}
        }
    }
}
