use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, instrument};

use super::dto::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::validation::Validate;
use crate::wire::{page_query, Id, ListResponse, MessageResponse};

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `page` is 1-based.
    async fn get_list_task(
        &self,
        page: u32,
        page_size: u32,
        filter: &TaskFilter,
    ) -> Result<ListResponse<Task>, ApiError>;

    async fn create_task(&self, body: &CreateTask) -> Result<MessageResponse, ApiError>;

    async fn update_task(&self, id: &Id, body: &UpdateTask) -> Result<MessageResponse, ApiError>;
}

#[async_trait]
impl TaskApi for ApiClient {
    #[instrument(skip(self, filter))]
    async fn get_list_task(
        &self,
        page: u32,
        page_size: u32,
        filter: &TaskFilter,
    ) -> Result<ListResponse<Task>, ApiError> {
        let mut query = page_query(page, page_size)?;
        query.extend(filter.query_pairs());
        let list: ListResponse<Task> = self.get_json(&["tasks"], &query).await?;
        list.check(page_size)?;
        debug!(rows = list.data.len(), total = list.paging.total_items, "tasks loaded");
        Ok(list)
    }

    #[instrument(skip(self, body), fields(name = %body.name))]
    async fn create_task(&self, body: &CreateTask) -> Result<MessageResponse, ApiError> {
        body.validate()?;
        let res: MessageResponse = self.send_json(Method::POST, &["tasks"], body).await?;
        info!(message = %res.message, "task created");
        Ok(res)
    }

    #[instrument(skip(self, body))]
    async fn update_task(&self, id: &Id, body: &UpdateTask) -> Result<MessageResponse, ApiError> {
        body.validate()?;
        let id = id.to_string();
        let res: MessageResponse = self
            .send_json(Method::PUT, &["tasks", id.as_str()], body)
            .await?;
        info!(message = %res.message, "task updated");
        Ok(res)
    }
}
