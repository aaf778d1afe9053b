use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, instrument};

use super::dto::{
    AddMember, AddProjectMember, MemberList, MemberNotInProjectFilter, ProjectMember,
};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::validation::Validate;
use crate::wire::{page_query, Id, ListResponse, MessageResponse};

#[async_trait]
pub trait MemberApi: Send + Sync {
    async fn get_list_project_member(&self, project_id: &Id) -> Result<MemberList, ApiError>;

    async fn get_members_not_in_project(
        &self,
        project_id: &Id,
        page: u32,
        page_size: u32,
        filter: &MemberNotInProjectFilter,
    ) -> Result<ListResponse<ProjectMember>, ApiError>;

    async fn add_project_member(
        &self,
        project_id: &Id,
        member_id: &Id,
    ) -> Result<MessageResponse, ApiError>;

    async fn create_member_account(&self, body: &AddMember) -> Result<MessageResponse, ApiError>;
}

#[async_trait]
impl MemberApi for ApiClient {
    #[instrument(skip(self))]
    async fn get_list_project_member(&self, project_id: &Id) -> Result<MemberList, ApiError> {
        let project = project_id.to_string();
        let list: MemberList = self
            .get_json(
                &["projects", project.as_str(), "members"],
                &Vec::<(&str, String)>::new(),
            )
            .await?;
        debug!(count = list.data.len(), "project members loaded");
        Ok(list)
    }

    #[instrument(skip(self, filter))]
    async fn get_members_not_in_project(
        &self,
        project_id: &Id,
        page: u32,
        page_size: u32,
        filter: &MemberNotInProjectFilter,
    ) -> Result<ListResponse<ProjectMember>, ApiError> {
        let mut query = page_query(page, page_size)?;
        query.extend(filter.query_pairs());
        let project = project_id.to_string();
        let list: ListResponse<ProjectMember> = self
            .get_json(
                &["projects", project.as_str(), "members", "not-in-project"],
                &query,
            )
            .await?;
        list.check(page_size)?;
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn add_project_member(
        &self,
        project_id: &Id,
        member_id: &Id,
    ) -> Result<MessageResponse, ApiError> {
        let body = AddProjectMember {
            member_id: member_id.clone(),
        };
        let project = project_id.to_string();
        let res: MessageResponse = self
            .send_json(Method::POST, &["projects", project.as_str(), "members"], &body)
            .await?;
        info!(message = %res.message, "member added to project");
        Ok(res)
    }

    #[instrument(skip(self, body), fields(user_name = %body.user_name, role = %body.role))]
    async fn create_member_account(&self, body: &AddMember) -> Result<MessageResponse, ApiError> {
        body.validate()?;
        let res: MessageResponse = self.send_json(Method::POST, &["accounts"], body).await?;
        info!(message = %res.message, "member account created");
        Ok(res)
    }
}
