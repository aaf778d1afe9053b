mod api;
mod dto;

pub use api::InternApi;
pub use dto::{CreateIntern, Gender};
