//! Request dashboard: action sequencing on top of [`RequestView`]
//!
//! Every mutating action patches the local master list as soon as the admin
//! service accepts it, then (when reconciliation is enabled) reloads the full
//! list. The selected status filter survives reloads; the page resets to 1.

use crate::api_client::AdminService;
use crate::mode::UiMode;
use crate::view::{DEFAULT_PAGE_SIZE, RequestView};
use ridedesk_core::utils::non_blank;
use ridedesk_core::{
    ActionResult, Config, Error, NewRequest, Operator, RequestId, RequestRecord, RequestStatus,
    Result, StatusFilter,
};
use std::fmt;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

/// Last failure, kept for display until the next successful service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Operation that failed
    pub operation: &'static str,
    /// Failure description
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.message)
    }
}

/// Dashboard settings
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Rows per page
    pub page_size: NonZeroUsize,
    /// Origin used to resolve relative photo paths
    pub file_base_url: String,
    /// Reload after every mutating action
    pub reconcile_after_action: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            file_base_url: String::new(),
            reconcile_after_action: true,
        }
    }
}

impl DashboardOptions {
    /// Options taken from the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the page size is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            page_size: config.view.page_size()?,
            file_base_url: config.api.file_base_url.clone(),
            reconcile_after_action: config.sync.reconcile_after_action,
        })
    }
}

/// Admin dashboard over an [`AdminService`]
#[derive(Debug)]
pub struct Dashboard<S> {
    service: S,
    view: RequestView,
    mode: UiMode,
    selected: Option<RequestId>,
    action_result: Option<ActionResult>,
    notice: Option<Notice>,
    options: DashboardOptions,
}

impl<S: AdminService> Dashboard<S> {
    /// Create an empty dashboard; call [`Dashboard::load`] to fetch requests
    pub fn new(service: S, options: DashboardOptions) -> Self {
        Self {
            service,
            view: RequestView::new(options.page_size),
            mode: UiMode::Idle,
            selected: None,
            action_result: None,
            notice: None,
            options,
        }
    }

    /// The underlying admin service
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Filtered and paged request list
    pub const fn view(&self) -> &RequestView {
        &self.view
    }

    /// Current dialog state
    pub const fn mode(&self) -> &UiMode {
        &self.mode
    }

    /// Selected request, if any
    pub fn selected_request_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Result of the most recent approve/reject
    pub const fn action_result(&self) -> Option<&ActionResult> {
        self.action_result.as_ref()
    }

    /// Most recent failure
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Fetch all requests and rebuild the view
    ///
    /// # Errors
    ///
    /// Returns the service error; the previous list is kept.
    pub async fn load(&mut self) -> Result<()> {
        let records = self
            .service
            .list_requests()
            .await
            .map_err(|e| self.fail("load requests", e))?;

        let file_base = self.options.file_base_url.as_str();
        let records: Vec<RequestRecord> = records
            .into_iter()
            .map(|r| r.with_resolved_photos(file_base))
            .collect();

        info!(count = records.len(), filter = %self.view.selected_status(), "requests loaded");
        self.view.replace_all(records);
        self.notice = None;
        Ok(())
    }

    /// Show only requests matching `filter`
    pub fn filter_by_status(&mut self, filter: StatusFilter) {
        debug!(%filter, "status filter applied");
        self.view.apply_filter(filter);
    }

    /// Advance one page
    pub fn next_page(&mut self) -> bool {
        self.view.next_page()
    }

    /// Go back one page
    pub fn prev_page(&mut self) -> bool {
        self.view.prev_page()
    }

    /// Jump to a page, clamped to the valid range
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.view.go_to_page(page)
    }

    /// Select `request_id`, or clear the selection if it is already selected
    pub fn toggle_selection(&mut self, request_id: &str) {
        if self.selected.as_deref() == Some(request_id) {
            self.selected = None;
        } else {
            self.selected = Some(request_id.to_string());
        }
    }

    /// Open the create form with an empty draft
    pub fn open_create(&mut self) {
        self.enter_mode(UiMode::CreateOpen(Box::default()));
    }

    /// Draft being edited in the create form
    pub fn draft_mut(&mut self) -> Option<&mut NewRequest> {
        self.mode.draft_mut()
    }

    /// Close the create form, discarding the draft
    pub fn close_create(&mut self) {
        if matches!(self.mode, UiMode::CreateOpen(_)) {
            self.mode = UiMode::Idle;
        }
    }

    /// Validate and submit the create form, then reload
    ///
    /// The form stays open with its draft when validation or the call fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the form is not open, a validation
    /// error for a bad draft, or the service error.
    pub async fn submit_create(&mut self) -> Result<()> {
        let draft = match std::mem::take(&mut self.mode) {
            UiMode::CreateOpen(draft) => draft,
            other => {
                debug!(mode = other.name(), "create submitted without an open form");
                self.mode = other;
                return Err(Error::InvalidState("create form is not open".to_string()));
            }
        };

        let payload = match NewRequest::clone(&draft).prepare() {
            Ok(payload) => payload,
            Err(e) => {
                self.mode = UiMode::CreateOpen(draft);
                return Err(e);
            }
        };

        if let Err(e) = self.service.create_request(&payload).await {
            self.mode = UiMode::CreateOpen(draft);
            return Err(self.fail("create request", e));
        }

        info!(user = %payload.user_name, "request created");
        self.notice = None;
        self.mode = UiMode::Idle;
        if let Err(e) = self.load().await {
            warn!(error = %e, "reload after create failed");
        }
        Ok(())
    }

    /// Open the approve dialog for `request_id`
    pub fn begin_approve(&mut self, request_id: &str) {
        self.selected = Some(request_id.to_string());
        self.enter_mode(UiMode::ApprovePending {
            request_id: request_id.to_string(),
        });
    }

    /// Submit the open approve dialog as `operator`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if no approve dialog is open, or the
    /// service error (the dialog stays open).
    pub async fn submit_approve(&mut self, operator: &Operator, comments: &str) -> Result<()> {
        let UiMode::ApprovePending { request_id } = &self.mode else {
            return Err(Error::InvalidState("approve dialog is not open".to_string()));
        };
        let request_id = request_id.clone();

        let result = self
            .service
            .approve(&request_id, operator, comments)
            .await
            .map_err(|e| self.fail("approve request", e))?;

        info!(request_id = %request_id, operator = %operator.name, "request approved");
        self.notice = None;
        self.action_result = Some(result);

        let comments = non_blank(comments);
        self.apply_local(&request_id, RequestStatus::Approved, comments);
        self.mode = UiMode::Idle;
        self.reconcile().await;
        Ok(())
    }

    /// Open the reject dialog for `request_id`
    pub fn begin_reject(&mut self, request_id: &str) {
        self.selected = Some(request_id.to_string());
        self.enter_mode(UiMode::RejectPending {
            request_id: request_id.to_string(),
        });
    }

    /// Submit the open reject dialog as `operator`
    ///
    /// The reason is recorded as the request's comments locally and in the
    /// action result, even if the service does not echo it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if no reject dialog is open, or the
    /// service error (the dialog stays open).
    pub async fn submit_reject(&mut self, operator: &Operator, reason: &str) -> Result<()> {
        let UiMode::RejectPending { request_id } = &self.mode else {
            return Err(Error::InvalidState("reject dialog is not open".to_string()));
        };
        let request_id = request_id.clone();

        let mut result = self
            .service
            .reject(&request_id, operator, reason)
            .await
            .map_err(|e| self.fail("reject request", e))?;

        info!(request_id = %request_id, operator = %operator.name, "request rejected");
        self.notice = None;
        result.comments = Some(reason.to_string());
        self.action_result = Some(result);

        self.apply_local(&request_id, RequestStatus::Rejected, Some(reason.to_string()));
        self.mode = UiMode::Idle;
        self.reconcile().await;
        Ok(())
    }

    /// Close an open approve or reject dialog without submitting
    pub fn dismiss_dialog(&mut self) {
        if self.mode.pending_request().is_some() {
            self.mode = UiMode::Idle;
        }
    }

    /// Cancel `request_id`
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub async fn cancel(&mut self, request_id: &str) -> Result<()> {
        self.service
            .cancel(request_id)
            .await
            .map_err(|e| self.fail("cancel request", e))?;

        info!(request_id = %request_id, "request cancelled");
        self.notice = None;
        self.apply_local(request_id, RequestStatus::Cancelled, None);
        self.reconcile().await;
        Ok(())
    }

    /// Fetch the selected request and open the details view
    ///
    /// Missing comments fall back to those of the last action result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] when nothing is selected, or the service error.
    pub async fn open_details(&mut self) -> Result<()> {
        let request_id = self.selected.clone().ok_or(Error::NoSelection)?;

        let mut record = self
            .service
            .get_request(&request_id)
            .await
            .map_err(|e| self.fail("fetch request details", e))?;

        if record.comments().is_none() {
            record.comments = self
                .action_result
                .as_ref()
                .and_then(|r| r.comments.clone())
                .filter(|c| !c.trim().is_empty());
        }

        let record = record.with_resolved_photos(&self.options.file_base_url);
        self.notice = None;
        self.enter_mode(UiMode::DetailsOpen(Box::new(record)));
        Ok(())
    }

    /// Close the details view
    pub fn close_details(&mut self) {
        if matches!(self.mode, UiMode::DetailsOpen(_)) {
            self.mode = UiMode::Idle;
        }
    }

    /// Hide the last action result
    pub fn dismiss_action_result(&mut self) {
        self.action_result = None;
    }

    fn enter_mode(&mut self, mode: UiMode) {
        if !self.mode.is_idle() && self.mode.name() != mode.name() {
            debug!(
                from = self.mode.name(),
                to = mode.name(),
                "closing open dialog without submitting"
            );
        }
        self.mode = mode;
    }

    fn apply_local(&mut self, request_id: &str, status: RequestStatus, comments: Option<String>) {
        let found = self.view.patch(request_id, |record| {
            record.status = status;
            if comments.is_some() {
                record.comments = comments;
            }
        });
        if !found {
            debug!(request_id, "patched request is not in the loaded list");
        }
        self.view.refresh();
    }

    async fn reconcile(&mut self) {
        if !self.options.reconcile_after_action {
            return;
        }
        if let Err(e) = self.load().await {
            warn!(error = %e, "reload after action failed; keeping local changes");
        }
    }

    fn fail(&mut self, operation: &'static str, error: Error) -> Error {
        warn!(operation, error = %error, "admin service call failed");
        self.notice = Some(Notice {
            operation,
            message: error.to_string(),
        });
        error
    }
}
