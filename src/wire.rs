use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Server-issued identifier. The backend is not consistent about whether ids
/// are numbers or strings, so both are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Number(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

/// Effort values arrive either as numbers or as free text ("2h").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effort {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effort::Amount(n) => write!(f, "{n}"),
            Effort::Text(s) => f.write_str(s),
        }
    }
}

/// Plain `{ message }` acknowledgement returned by create/update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Paging block of list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub page: u32,
    #[serde(rename = "psize", alias = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "items", alias = "totalItems")]
    pub total_items: u64,
    #[serde(rename = "pages", alias = "totalPages")]
    pub total_pages: u32,
}

impl Paging {
    pub fn expected_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_items.div_ceil(u64::from(self.page_size)) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub paging: Paging,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl<T> ListResponse<T> {
    /// Rejects pages that could not have come from a `page_size`-sized query.
    pub fn check(&self, page_size: u32) -> Result<(), ApiError> {
        if self.data.len() > page_size as usize {
            return Err(ApiError::Contract(format!(
                "page holds {} rows but {} were requested",
                self.data.len(),
                page_size
            )));
        }
        if self.data.len() as u64 > self.paging.total_items {
            return Err(ApiError::Contract(format!(
                "page holds {} rows but only {} items exist",
                self.data.len(),
                self.paging.total_items
            )));
        }
        if self.paging.page_size > 0 && self.paging.total_pages != self.paging.expected_pages() {
            return Err(ApiError::Contract(format!(
                "{} items at {} per page cannot span {} pages",
                self.paging.total_items, self.paging.page_size, self.paging.total_pages
            )));
        }
        Ok(())
    }
}

/// `page` and `psize` query pairs; both are 1-based.
pub(crate) fn page_query(
    page: u32,
    page_size: u32,
) -> Result<Vec<(&'static str, String)>, ApiError> {
    if page == 0 || page_size == 0 {
        return Err(ApiError::Contract(format!(
            "page {page} of size {page_size} requested; both start at 1"
        )));
    }
    Ok(vec![("page", page.to_string()), ("psize", page_size.to_string())])
}

/// Approval flags come back as booleans or as "true"/"false" strings.
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(de::Error::custom(format!("invalid approval flag `{other}`"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paging(page_size: u32, total_items: u64, total_pages: u32) -> Paging {
        Paging {
            page: 1,
            page_size,
            total_items,
            total_pages,
        }
    }

    #[test]
    fn paging_accepts_wire_and_camel_case_names() {
        let wire: Paging =
            serde_json::from_str(r#"{"page":1,"psize":5,"items":12,"pages":3}"#).unwrap();
        let camel: Paging =
            serde_json::from_str(r#"{"page":1,"pageSize":5,"totalItems":12,"totalPages":3}"#)
                .unwrap();
        assert_eq!(wire, camel);
        assert_eq!(wire.expected_pages(), 3);
    }

    #[test]
    fn check_rejects_oversized_page() {
        let res = ListResponse {
            data: vec![1, 2, 3, 4, 5, 6],
            paging: paging(5, 6, 2),
            status: None,
        };
        assert!(matches!(res.check(5), Err(ApiError::Contract(_))));
    }

    #[test]
    fn check_rejects_inconsistent_page_count() {
        let res = ListResponse {
            data: vec![1, 2],
            paging: paging(5, 12, 2),
            status: None,
        };
        assert!(res.check(5).is_err());
        let ok = ListResponse {
            data: vec![1, 2],
            paging: paging(5, 12, 3),
            status: None,
        };
        assert!(ok.check(5).is_ok());
    }

    #[test]
    fn empty_listing_is_consistent() {
        let res: ListResponse<u8> = ListResponse {
            data: vec![],
            paging: paging(5, 0, 0),
            status: Some(200),
        };
        assert!(res.check(5).is_ok());
    }

    #[test]
    fn page_query_starts_at_one() {
        assert!(page_query(0, 5).is_err());
        assert!(page_query(1, 0).is_err());
        assert_eq!(
            page_query(2, 10).unwrap(),
            vec![("page", "2".to_string()), ("psize", "10".to_string())]
        );
    }

    #[test]
    fn id_keeps_number_or_text() {
        let ids: Vec<Id> = serde_json::from_str(r#"[7, "abc"]"#).unwrap();
        assert_eq!(ids, vec![Id::Number(7), Id::Text("abc".into())]);
        assert_eq!(ids[0].to_string(), "7");
    }
}
