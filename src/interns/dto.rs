use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::rules::{self, EMAIL_RE};
use crate::validation::{
    check_rules, format_date, parse_date, Field, FieldErrors, FieldInput, Validate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender `{other}`")),
        }
    }
}

/// Request body for creating an intern account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "kebab-case")]
pub struct CreateIntern {
    #[validate(length(min = 4, message = "Username must be at least 4 characters"))]
    pub user_name: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(regex(path = *EMAIL_RE, message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 4, message = "Student code must be at least 4 characters"))]
    pub student_code: String,
    #[validate(length(min = 10, max = 11, message = "Phone number must have 10 to 11 digits"))]
    pub phone_number: String,
    #[validate(custom(function = "rules::date_of_birth"))]
    pub date_of_birth: String,
    #[validate(custom(function = "rules::address"))]
    pub address: String,
    #[serde(default)]
    pub avatar: String,
    #[validate(required(message = "Gender is required"))]
    pub gender: Option<Gender>,
    /// Id of the OJT term the intern belongs to.
    pub ojt_id: i64,
}

impl Default for CreateIntern {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            password: String::new(),
            email: String::new(),
            student_code: String::new(),
            phone_number: String::new(),
            date_of_birth: String::new(),
            address: String::new(),
            avatar: String::new(),
            gender: Some(Gender::Male),
            ojt_id: 1,
        }
    }
}

impl CreateIntern {
    /// Copy with the date of birth rewritten as `YYYY-MM-DD`.
    pub fn normalized(&self) -> Self {
        let mut body = self.clone();
        if let Some(date) = parse_date(&self.date_of_birth) {
            body.date_of_birth = format_date(date);
        }
        body
    }
}

impl Validate for CreateIntern {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_rules(self)
    }
}

impl FieldInput for CreateIntern {
    fn set_input(&mut self, field: Field, value: &str) {
        match field {
            Field::UserName => self.user_name = value.to_string(),
            Field::Password => self.password = value.to_string(),
            Field::Email => self.email = value.to_string(),
            Field::StudentCode => self.student_code = value.to_string(),
            Field::PhoneNumber => self.phone_number = value.to_string(),
            Field::DateOfBirth => self.date_of_birth = value.to_string(),
            Field::Address => self.address = value.to_string(),
            Field::Avatar => self.avatar = value.to_string(),
            Field::Gender => self.gender = value.parse().ok(),
            _ => {}
        }
    }
}
