use std::future::Future;

use tracing::{debug, warn};

use super::{Outcome, RequestGate, RequestToken};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::members::{MemberApi, MemberNotInProjectFilter, ProjectMember};
use crate::tasks::{Task, TaskApi, TaskFilter};
use crate::validation::messages;
use crate::wire::{Id, ListResponse};

/// Parameters of one list fetch.
#[derive(Debug, Clone)]
pub struct ListRequest<F> {
    pub token: RequestToken,
    pub page: u32,
    pub page_size: u32,
    pub filter: F,
}

/// Paging and filter state of one list view. Each view fetches on its own.
#[derive(Debug)]
pub struct ListView<T, F> {
    page: u32,
    page_size: u32,
    filter: F,
    listing: Option<ListResponse<T>>,
    loading: bool,
    error: Option<String>,
    gate: RequestGate,
}

impl<T, F> ListView<T, F>
where
    F: Clone + Default,
{
    /// A view on the first page, sized by `API_DEFAULT_PAGE_SIZE`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.default_page_size)
    }

    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            filter: F::default(),
            listing: None,
            loading: false,
            error: None,
            gate: RequestGate::default(),
        }
    }

    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn listing(&self) -> Option<&ListResponse<T>> {
        self.listing.as_ref()
    }

    pub fn rows(&self) -> &[T] {
        self.listing.as_ref().map(|l| l.data.as_slice()).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Any fetch still in flight belongs to the old page and becomes stale.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.supersede();
    }

    /// Changing the page size starts over at the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
        self.supersede();
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.page = 1;
        self.supersede();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(F::default());
    }

    /// Issues a new fetch; any fetch still in flight becomes stale.
    pub fn begin_fetch(&mut self) -> ListRequest<F> {
        self.loading = true;
        ListRequest {
            token: self.gate.issue(),
            page: self.page,
            page_size: self.page_size,
            filter: self.filter.clone(),
        }
    }

    pub fn finish_fetch(
        &mut self,
        token: RequestToken,
        result: Result<ListResponse<T>, ApiError>,
    ) -> Outcome {
        if !self.gate.is_current(token) {
            warn!(?token, "discarding superseded list response");
            return Outcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(listing) => {
                debug!(
                    page = listing.paging.page,
                    rows = listing.data.len(),
                    total = listing.paging.total_items,
                    "list loaded"
                );
                self.listing = Some(listing);
                self.error = None;
                Outcome::Succeeded(())
            }
            Err(err) => {
                warn!(error = %err, "list fetch failed");
                self.error = Some(match err.envelope() {
                    Some(envelope) if !envelope.message.trim().is_empty() => {
                        envelope.message.clone()
                    }
                    _ => messages::GENERIC_FAILURE.to_string(),
                });
                Outcome::Failed
            }
        }
    }

    pub async fn fetch_with<Fut>(
        &mut self,
        fetch: impl FnOnce(ListRequest<F>) -> Fut,
    ) -> Outcome
    where
        Fut: Future<Output = Result<ListResponse<T>, ApiError>>,
    {
        let request = self.begin_fetch();
        let token = request.token;
        let result = fetch(request).await;
        self.finish_fetch(token, result)
    }

    /// The view was unmounted; responses still in flight are ignored.
    pub fn close(&mut self) {
        self.supersede();
    }

    fn supersede(&mut self) {
        self.gate.invalidate();
        self.loading = false;
    }
}

impl ListView<Task, TaskFilter> {
    pub async fn load<A: TaskApi + ?Sized>(&mut self, api: &A) -> Outcome {
        self.fetch_with(|req| async move {
            api.get_list_task(req.page, req.page_size, &req.filter).await
        })
        .await
    }
}

impl ListView<ProjectMember, MemberNotInProjectFilter> {
    pub async fn load<A: MemberApi + ?Sized>(&mut self, api: &A, project_id: &Id) -> Outcome {
        self.fetch_with(|req| async move {
            api.get_members_not_in_project(project_id, req.page, req.page_size, &req.filter)
                .await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorEnvelope;
    use crate::wire::Paging;

    fn page_of(page: u32, rows: Vec<u32>, total: u64) -> Result<ListResponse<u32>, ApiError> {
        Ok(ListResponse {
            data: rows,
            paging: Paging {
                page,
                page_size: 5,
                total_items: total,
                total_pages: total.div_ceil(5) as u32,
            },
            status: None,
        })
    }

    #[test]
    fn filter_and_size_changes_reset_page() {
        let mut view: ListView<u32, TaskFilter> = ListView::new(5);
        view.set_page(3);
        view.set_filter(TaskFilter {
            status: Some("done".into()),
            ..Default::default()
        });
        assert_eq!(view.page(), 1);
        view.set_page(2);
        view.set_page_size(10);
        assert_eq!((view.page(), view.page_size()), (1, 10));
        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn older_page_response_is_dropped() {
        let mut view: ListView<u32, TaskFilter> = ListView::new(5);
        let first = view.begin_fetch();
        view.set_page(2);
        let second = view.begin_fetch();
        assert_eq!(second.page, 2);

        assert_eq!(
            view.finish_fetch(first.token, page_of(1, vec![1, 2, 3, 4, 5], 7)),
            Outcome::Stale
        );
        assert!(view.is_loading());
        assert!(view.rows().is_empty());

        assert!(view
            .finish_fetch(second.token, page_of(2, vec![6, 7], 7))
            .is_success());
        assert_eq!(view.rows(), &[6, 7]);
        assert!(!view.is_loading());
    }

    #[test]
    fn failure_keeps_previous_rows() {
        let mut view: ListView<u32, TaskFilter> = ListView::new(5);
        let req = view.begin_fetch();
        view.finish_fetch(req.token, page_of(1, vec![1], 1));
        let req = view.begin_fetch();
        let out = view.finish_fetch(
            req.token,
            Err(ApiError::Server {
                status: 500,
                envelope: ErrorEnvelope::default(),
            }),
        );
        assert_eq!(out, Outcome::Failed);
        assert_eq!(view.rows(), &[1]);
        assert_eq!(view.error(), Some(messages::GENERIC_FAILURE));
    }

    #[test]
    fn response_for_the_old_filter_is_dropped() {
        let mut view: ListView<u32, TaskFilter> = ListView::new(5);
        let first = view.begin_fetch();
        view.set_filter(TaskFilter {
            status: Some("done".into()),
            ..Default::default()
        });
        assert!(!view.is_loading());
        assert_eq!(
            view.finish_fetch(first.token, page_of(1, vec![1, 2, 3], 3)),
            Outcome::Stale
        );
        assert!(view.rows().is_empty());
    }

    #[test]
    fn page_and_size_changes_also_drop_in_flight_fetches() {
        let mut view: ListView<u32, TaskFilter> = ListView::new(5);
        let first = view.begin_fetch();
        view.set_page(2);
        assert_eq!(view.finish_fetch(first.token, page_of(1, vec![1], 1)), Outcome::Stale);
        let second = view.begin_fetch();
        view.set_page_size(10);
        assert_eq!(view.finish_fetch(second.token, page_of(2, vec![2], 1)), Outcome::Stale);
        view.clear_filter();
        assert!(view.rows().is_empty());
    }

    #[test]
    fn page_size_comes_from_config() {
        let mut config = ClientConfig::new("http://localhost/api/v1");
        config.default_page_size = 20;
        let view: ListView<u32, TaskFilter> = ListView::from_config(&config);
        assert_eq!((view.page(), view.page_size()), (1, 20));
    }

    #[tokio::test]
    async fn closed_view_ignores_late_response() {
        let mut view: ListView<u32, TaskFilter> = ListView::new(5);
        let req = view.begin_fetch();
        view.close();
        assert_eq!(
            view.finish_fetch(req.token, page_of(1, vec![1], 1)),
            Outcome::Stale
        );
        let out = view
            .fetch_with(|req| async move { page_of(req.page, vec![9], 1) })
            .await;
        assert!(out.is_success());
        assert_eq!(view.rows(), &[9]);
    }
}
