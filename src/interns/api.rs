use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument};

use super::dto::CreateIntern;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::validation::Validate;
use crate::wire::MessageResponse;

#[async_trait]
pub trait InternApi: Send + Sync {
    async fn create_intern(&self, body: &CreateIntern) -> Result<MessageResponse, ApiError>;
}

#[async_trait]
impl InternApi for ApiClient {
    #[instrument(skip(self, body), fields(user_name = %body.user_name, ojt_id = body.ojt_id))]
    async fn create_intern(&self, body: &CreateIntern) -> Result<MessageResponse, ApiError> {
        body.validate()?;
        let res: MessageResponse = self
            .send_json(Method::POST, &["interns"], &body.normalized())
            .await?;
        info!(message = %res.message, "intern created");
        Ok(res)
    }
}
