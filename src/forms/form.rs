use std::future::Future;

use tracing::{debug, warn};

use super::{Acknowledge, Notice, Outcome, RequestGate, RequestToken};
use crate::auth::{AuthApi, AuthSession, LoginBody, RegisterBody};
use crate::duplicates::reconcile;
use crate::error::ApiError;
use crate::interns::{CreateIntern, InternApi};
use crate::members::{AddMember, MemberApi};
use crate::tasks::{CreateTask, TaskApi};
use crate::validation::{messages, Field, FieldErrors, FieldInput, Validate};
use crate::wire::MessageResponse;

/// A validated snapshot of the form, ready to send.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    pub token: RequestToken,
    pub body: T,
}

#[derive(Debug, Default)]
pub struct Form<T> {
    value: T,
    errors: FieldErrors,
    notice: Option<Notice>,
    busy: bool,
    closed: bool,
    gate: RequestGate,
}

impl<T> Form<T>
where
    T: Validate + FieldInput + Clone,
{
    pub fn new(value: T) -> Self {
        Self {
            value,
            errors: FieldErrors::new(),
            notice: None,
            busy: false,
            closed: false,
            gate: RequestGate::default(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// True while a submission is outstanding; the submit action is disabled.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Writes one text field and re-checks it along with the fields whose
    /// rules depend on it.
    pub fn change(&mut self, field: Field, input: &str) {
        self.value.set_input(field, input);
        let mut errors = self.errors.with(field, self.value.validate_field(field));
        for &dependent in self.value.dependents(field) {
            errors.set(dependent, self.value.validate_field(dependent));
        }
        self.errors = errors;
    }

    /// Edits values that are not typed text (selects, ids). Not validated
    /// until the next exhaustive pass.
    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
    }

    /// Re-checks every field; replaces the whole error map.
    pub fn validate_all(&mut self) -> bool {
        self.errors = match self.value.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        self.errors.is_empty()
    }

    pub fn begin_submit(&mut self) -> Option<Submission<T>> {
        if self.busy || self.closed {
            debug!(busy = self.busy, closed = self.closed, "submit ignored");
            return None;
        }
        if !self.validate_all() {
            debug!(errors = %self.errors, "submit blocked by validation");
            return None;
        }
        self.busy = true;
        self.notice = None;
        Some(Submission {
            token: self.gate.issue(),
            body: self.value.clone(),
        })
    }

    pub fn finish<R: Acknowledge>(
        &mut self,
        token: RequestToken,
        result: Result<R, ApiError>,
    ) -> Outcome<R> {
        if !self.gate.is_current(token) {
            warn!(?token, "discarding response for superseded submission");
            return Outcome::Stale;
        }
        self.busy = false;

        match result {
            Ok(res) => {
                self.notice = Some(Notice::Success(res.message().to_string()));
                Outcome::Succeeded(res)
            }
            Err(ApiError::Validation(errors)) => {
                self.errors = errors;
                Outcome::Failed
            }
            Err(ApiError::Server { status, envelope }) => {
                let reconciled = reconcile(&self.errors, &envelope);
                debug!(status, fields = %reconciled.errors, "server rejected submission");
                self.errors = reconciled.errors;
                self.notice = reconciled.notice.map(Notice::Error);
                Outcome::Failed
            }
            Err(other) => {
                warn!(error = %other, "submission failed");
                self.notice = Some(Notice::Error(messages::GENERIC_FAILURE.to_string()));
                Outcome::Failed
            }
        }
    }

    /// Runs one full submission: exhaustive validation, the request, and
    /// reconciliation of the result.
    pub async fn submit<R, F, Fut>(&mut self, send: F) -> Outcome<R>
    where
        R: Acknowledge,
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<R, ApiError>>,
    {
        let Some(submission) = self.begin_submit() else {
            return Outcome::Rejected;
        };
        let result = send(submission.body).await;
        self.finish(submission.token, result)
    }

    /// The form was dismissed; any response still in flight is ignored.
    pub fn close(&mut self) {
        self.closed = true;
        self.busy = false;
        self.gate.invalidate();
    }
}

impl Form<CreateIntern> {
    pub async fn submit_to<A: InternApi + ?Sized>(&mut self, api: &A) -> Outcome<MessageResponse> {
        self.submit(|body| async move { api.create_intern(&body).await })
            .await
    }
}

impl Form<RegisterBody> {
    pub async fn submit_to<A: AuthApi + ?Sized>(&mut self, api: &A) -> Outcome<AuthSession> {
        self.submit(|body| async move { api.register(&body).await })
            .await
    }
}

impl Form<LoginBody> {
    pub async fn submit_to<A: AuthApi + ?Sized>(&mut self, api: &A) -> Outcome<AuthSession> {
        self.submit(|body| async move { api.login(&body).await }).await
    }
}

impl Form<AddMember> {
    pub async fn submit_to<A: MemberApi + ?Sized>(&mut self, api: &A) -> Outcome<MessageResponse> {
        self.submit(|body| async move { api.create_member_account(&body).await })
            .await
    }
}

impl Form<CreateTask> {
    pub async fn submit_to<A: TaskApi + ?Sized>(&mut self, api: &A) -> Outcome<MessageResponse> {
        self.submit(|body| async move { api.create_task(&body).await })
            .await
    }
}
