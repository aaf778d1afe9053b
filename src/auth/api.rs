use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::{info, instrument};

use super::dto::{AuthSession, LoginBody, RegisterBody};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::validation::Validate;

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, body: &RegisterBody) -> Result<AuthSession, ApiError>;

    async fn login(&self, body: &LoginBody) -> Result<AuthSession, ApiError>;

    /// Extends the current session; requires a bearer token.
    async fn slide_session(&self) -> Result<AuthSession, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    #[instrument(skip(self, body), fields(email = %body.email))]
    async fn register(&self, body: &RegisterBody) -> Result<AuthSession, ApiError> {
        body.validate()?;
        let session: AuthSession = self
            .send_json(Method::POST, &["auth", "register"], body)
            .await?;
        info!(account_id = session.data.account_info.id, "account registered");
        Ok(session)
    }

    #[instrument(skip(self, body), fields(email = %body.email))]
    async fn login(&self, body: &LoginBody) -> Result<AuthSession, ApiError> {
        body.validate()?;
        let session: AuthSession = self
            .send_json(Method::POST, &["auth", "login"], body)
            .await?;
        info!(account_id = session.data.account_info.id, "logged in");
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn slide_session(&self) -> Result<AuthSession, ApiError> {
        self.send_json(Method::POST, &["auth", "slide-session"], &json!({}))
            .await
    }
}
