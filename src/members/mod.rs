mod api;
mod dto;

pub use api::MemberApi;
pub use dto::{AddMember, AddProjectMember, MemberList, MemberNotInProjectFilter, ProjectMember};
