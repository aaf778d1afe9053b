//! Typed client layer for the internship-management dashboard backend.
//!
//! The crate is split the same way the dashboard is: request/response
//! schemas per domain (`auth`, `interns`, `terms`, `tasks`, `members`),
//! the validators that guard them, the HTTP wrappers on [`ApiClient`], and
//! headless form/list state in [`forms`].

pub mod auth;
pub mod client;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod forms;
pub mod interns;
pub mod members;
pub mod tasks;
pub mod telemetry;
pub mod terms;
pub mod validation;
pub mod wire;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ErrorEnvelope};
pub use validation::{Field, FieldErrors, Validate};
pub use wire::{Id, ListResponse, MessageResponse, Paging};
