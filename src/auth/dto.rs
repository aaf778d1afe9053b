use serde::{Deserialize, Serialize};

use crate::validation::rules::{self, EMAIL_RE};
use crate::validation::{check_rules, Field, FieldErrors, FieldInput, Validate};

/// Request body for account registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, validator::Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterBody {
    #[validate(regex(path = *EMAIL_RE, message = "Invalid email"))]
    pub email: String,
    #[validate(custom(function = "rules::password_bounds"))]
    pub password: String,
    #[serde(rename = "confirmPassword")]
    #[validate(
        must_match(other = "password", message = "Passwords do not match"),
        custom(function = "rules::password_bounds")
    )]
    pub confirm_password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, validator::Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginBody {
    #[validate(regex(path = *EMAIL_RE, message = "Invalid email"))]
    pub email: String,
    #[validate(custom(function = "rules::password_bounds"))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    pub account_role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: String,
    pub account_info: AccountInfo,
}

/// Response of register, login and slide-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub data: SessionData,
    pub message: String,
}

impl Validate for RegisterBody {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_rules(self)
    }

    fn dependents(&self, field: Field) -> &'static [Field] {
        match field {
            // Nothing to compare against until the confirmation has been typed.
            Field::Password if !self.confirm_password.is_empty() => &[Field::ConfirmPassword],
            _ => &[],
        }
    }
}

impl FieldInput for RegisterBody {
    fn set_input(&mut self, field: Field, value: &str) {
        match field {
            Field::Email => self.email = value.to_string(),
            Field::Password => self.password = value.to_string(),
            Field::ConfirmPassword => self.confirm_password = value.to_string(),
            _ => {}
        }
    }
}

impl Validate for LoginBody {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_rules(self)
    }
}

impl FieldInput for LoginBody {
    fn set_input(&mut self, field: Field, value: &str) {
        match field {
            Field::Email => self.email = value.to_string(),
            Field::Password => self.password = value.to_string(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::messages;

    fn register(email: &str, password: &str, confirm: &str) -> RegisterBody {
        RegisterBody {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register("a@b.co", "secret1", "secret1").validate().is_ok());
    }

    #[test]
    fn mismatch_always_flags_confirm_password() {
        let cases = [
            register("a@b.co", "secret1", "secret2"),
            register("bad", "abc", "abcd"),
            register("a@b.co", "secret1", ""),
        ];
        for body in cases {
            let errors = body.validate().unwrap_err();
            assert_eq!(
                errors.get(Field::ConfirmPassword),
                Some(messages::PASSWORD_MISMATCH),
                "{body:?}"
            );
        }
    }

    #[test]
    fn exhaustive_pass_reports_every_field() {
        let errors = register("nope", "123", "123").validate().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(messages::EMAIL_INVALID));
        assert_eq!(errors.get(Field::Password), Some(messages::PASSWORD_TOO_SHORT));
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some(messages::PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn register_body_uses_camel_case_confirm() {
        let json = serde_json::to_value(register("a@b.co", "secret1", "secret1")).unwrap();
        assert_eq!(json["confirmPassword"], "secret1");
        assert!(serde_json::from_str::<RegisterBody>(
            r#"{"email":"a@b.co","password":"x","confirmPassword":"x","extra":1}"#
        )
        .is_err());
    }

    #[test]
    fn login_caps_password_length() {
        let body = LoginBody {
            email: "a@b.co".into(),
            password: "p".repeat(101),
        };
        let errors = body.validate().unwrap_err();
        assert_eq!(errors.get(Field::Password), Some(messages::PASSWORD_TOO_LONG));
    }

    #[test]
    fn session_decodes() {
        let session: AuthSession = serde_json::from_str(
            r#"{"data":{"token":"t","expiresAt":"2024-07-01T00:00:00Z",
                "account_info":{"id":3,"user_name":"mentor","email":"m@x.io","account_role":"mentor"}},
                "message":"Login successfully"}"#,
        )
        .unwrap();
        assert_eq!(session.data.account_info.id, 3);
        assert_eq!(session.data.expires_at, "2024-07-01T00:00:00Z");
    }
}
