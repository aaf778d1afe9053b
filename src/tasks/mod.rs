mod api;
mod dto;

pub use api::TaskApi;
pub use dto::{CreateTask, Task, TaskFilter, UpdateTask};
