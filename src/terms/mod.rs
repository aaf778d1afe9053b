//! OJT terms, used only as a lookup list when assigning an intern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::wire::Paging;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub semester: String,
}

/// Every argument is optional; an empty query lists all terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "psize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermList {
    pub data: Vec<Term>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl TermList {
    pub fn find(&self, id: i64) -> Option<&Term> {
        self.data.iter().find(|t| t.id == id)
    }
}

#[async_trait]
pub trait TermApi: Send + Sync {
    async fn get_list_term(&self, query: &TermQuery) -> Result<TermList, ApiError>;
}

#[async_trait]
impl TermApi for ApiClient {
    #[instrument(skip(self))]
    async fn get_list_term(&self, query: &TermQuery) -> Result<TermList, ApiError> {
        let list: TermList = self.get_json(&["terms"], query).await?;
        debug!(count = list.data.len(), "terms loaded");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_list_without_paging() {
        let list: TermList = serde_json::from_str(
            r#"{"data":[{"id":1,"semester":"Summer 2024"},{"id":2,"semester":"Fall 2024"}]}"#,
        )
        .unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.find(2).map(|t| t.semester.as_str()), Some("Fall 2024"));
        assert!(list.paging.is_none());
    }

    #[test]
    fn empty_query_serializes_to_nothing() {
        let json = serde_json::to_value(TermQuery::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
