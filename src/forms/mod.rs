//! Headless state behind the dashboard's forms and list views.
//!
//! Every submission and every list fetch is tagged with a [`RequestToken`].
//! Closing a form, or asking a list for a different page, invalidates the
//! tokens already handed out; a response that comes back with one of those
//! is dropped instead of being applied.

mod form;
mod list;

pub use form::{Form, Submission};
pub use list::{ListRequest, ListView};

use crate::auth::{AuthSession, LoginBody, RegisterBody};
use crate::interns::CreateIntern;
use crate::members::{AddMember, MemberNotInProjectFilter, ProjectMember};
use crate::tasks::{CreateTask, Task, TaskFilter};
use crate::wire::MessageResponse;

pub type InternForm = Form<CreateIntern>;
pub type RegisterForm = Form<RegisterBody>;
pub type LoginForm = Form<LoginBody>;
pub type AddMemberForm = Form<AddMember>;
pub type CreateTaskForm = Form<CreateTask>;

pub type TaskListView = ListView<Task, TaskFilter>;
pub type MembersNotInProjectView = ListView<ProjectMember, MemberNotInProjectFilter>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Generation counter; only the most recently issued token is current.
#[derive(Debug, Default)]
pub struct RequestGate {
    generation: u64,
}

impl RequestGate {
    pub fn issue(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }
}

/// Toast-level feedback for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<R = ()> {
    Succeeded(R),
    /// The request failed; errors and notice have been updated.
    Failed,
    /// Nothing was sent: invalid input, a submission already running, or a
    /// closed form.
    Rejected,
    /// The response belonged to a superseded request and was discarded.
    Stale,
}

impl<R> Outcome<R> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// Responses that carry a message worth showing on success.
pub trait Acknowledge {
    fn message(&self) -> &str;
}

impl Acknowledge for MessageResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

impl Acknowledge for AuthSession {
    fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_token_is_current() {
        let mut gate = RequestGate::default();
        let first = gate.issue();
        let second = gate.issue();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
        gate.invalidate();
        assert!(!gate.is_current(second));
    }
}
