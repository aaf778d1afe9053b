use serde::{Deserialize, Serialize};

use crate::validation::FieldErrors;

/// Body of a non-2xx response: `{ "message": ..., "log": ... }`.
///
/// Some deployments wrap it as `{ "payload": { ... } }`; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl ErrorEnvelope {
    pub fn from_body(body: &[u8]) -> Self {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Wrapped { payload: ErrorEnvelope },
            Flat(ErrorEnvelope),
        }

        match serde_json::from_slice::<Shape>(body) {
            Ok(Shape::Wrapped { payload }) => payload,
            Ok(Shape::Flat(envelope)) => envelope,
            Err(_) => Self {
                message: String::from_utf8_lossy(body).trim().to_string(),
                log: None,
            },
        }
    }

    pub fn log(&self) -> &str {
        self.log.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base url `{0}`")]
    InvalidBaseUrl(String),

    #[error("server returned {status}: {}", .envelope.message)]
    Server { status: u16, envelope: ErrorEnvelope },

    #[error("response ({status}) did not match the expected schema: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("paging contract violated: {0}")]
    Contract(String),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl ApiError {
    /// Envelope of a server-reported business error, if this is one.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ApiError::Server { envelope, .. } => Some(envelope),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_reads_flat_body() {
        let env = ErrorEnvelope::from_body(
            br#"{"message":"Bad request","log":"duplicate data [email]"}"#,
        );
        assert_eq!(env.message, "Bad request");
        assert_eq!(env.log(), "duplicate data [email]");
    }

    #[test]
    fn envelope_reads_payload_wrapper() {
        let env = ErrorEnvelope::from_body(br#"{"payload":{"message":"nope"}}"#);
        assert_eq!(env.message, "nope");
        assert_eq!(env.log, None);
    }

    #[test]
    fn envelope_falls_back_to_raw_text() {
        let env = ErrorEnvelope::from_body(b"Gateway Timeout\n");
        assert_eq!(env.message, "Gateway Timeout");
        assert_eq!(env.log(), "");
    }

    #[test]
    fn server_error_displays_message() {
        let err = ApiError::Server {
            status: 409,
            envelope: ErrorEnvelope {
                message: "conflict".into(),
                log: None,
            },
        };
        assert_eq!(err.to_string(), "server returned 409: conflict");
        assert!(err.envelope().is_some());
    }
}
