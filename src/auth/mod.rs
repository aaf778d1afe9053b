mod api;
mod dto;

pub use api::AuthApi;
pub use dto::{AccountInfo, AuthSession, LoginBody, RegisterBody, SessionData};
