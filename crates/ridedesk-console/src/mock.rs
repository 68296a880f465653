//! In-memory admin service for testing

use crate::api_client::AdminService;
use async_trait::async_trait;
use parking_lot::Mutex;
use ridedesk_core::{
    ActionResult, Error, NewRequest, Operator, RequestRecord, RequestStatus, Result,
};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MockState {
    records: Vec<RequestRecord>,
    calls: Vec<String>,
    fail_next: Option<&'static str>,
    next_id: usize,
    drop_comments: bool,
}

/// Mock admin service backed by a shared record list
///
/// Clones share state, so a test can keep one handle for assertions while the
/// dashboard owns another.
#[derive(Debug, Clone, Default)]
pub struct MockAdminService {
    state: Arc<Mutex<MockState>>,
}

impl MockAdminService {
    /// Create an empty mock service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the service with records
    #[must_use]
    pub fn with_records(self, records: Vec<RequestRecord>) -> Self {
        {
            let mut state = self.state.lock();
            state.next_id = records.len();
            state.records = records;
        }
        self
    }

    /// Make the server forget action comments, like a backend that only stores status
    #[must_use]
    pub fn dropping_comments(self) -> Self {
        self.state.lock().drop_comments = true;
        self
    }

    /// Fail the next call to `operation` with a transport error
    pub fn fail_next(&self, operation: &'static str) {
        self.state.lock().fail_next = Some(operation);
    }

    /// Operations called so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    /// Number of calls to `operation`
    #[must_use]
    pub fn call_count(&self, operation: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == operation).count()
    }

    /// Server-side copy of the records
    #[must_use]
    pub fn records(&self) -> Vec<RequestRecord> {
        self.state.lock().records.clone()
    }

    fn enter(&self, operation: &'static str) -> Result<parking_lot::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock();
        state.calls.push(operation.to_string());
        if state.fail_next == Some(operation) {
            state.fail_next = None;
            return Err(Error::Transport(format!("mock {operation} failure")));
        }
        Ok(state)
    }

    fn update(
        &self,
        operation: &'static str,
        request_id: &str,
        status: RequestStatus,
        comments: Option<&str>,
    ) -> Result<()> {
        let mut state = self.enter(operation)?;
        let drop_comments = state.drop_comments;
        let record = state
            .records
            .iter_mut()
            .find(|r| r.request_id == request_id)
            .ok_or_else(|| Error::NotFound {
                resource: format!("request {request_id}"),
            })?;

        record.status = status;
        if let Some(comments) = comments.filter(|_| !drop_comments) {
            record.comments = Some(comments.to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl AdminService for MockAdminService {
    async fn list_requests(&self) -> Result<Vec<RequestRecord>> {
        let state = self.enter("list")?;
        Ok(state.records.clone())
    }

    async fn get_request(&self, request_id: &str) -> Result<RequestRecord> {
        let state = self.enter("get")?;
        state
            .records
            .iter()
            .find(|r| r.request_id == request_id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                resource: format!("request {request_id}"),
            })
    }

    async fn create_request(&self, payload: &NewRequest) -> Result<()> {
        let mut state = self.enter("create")?;
        state.next_id += 1;
        let record = RequestRecord {
            request_id: format!("R{}", state.next_id),
            user_name: payload.user_name.clone(),
            from_location: payload.from_location.clone(),
            to_location: payload.to_location.clone(),
            goods_description: payload.goods_description.clone(),
            fare: payload.fare,
            status: payload.status,
            comments: ridedesk_core::utils::non_blank(&payload.comments),
            goods_photo1_url: ridedesk_core::utils::non_blank(&payload.goods_photo1_url),
            goods_photo2_url: ridedesk_core::utils::non_blank(&payload.goods_photo2_url),
            ..RequestRecord::default()
        };
        state.records.push(record);
        Ok(())
    }

    async fn approve(
        &self,
        request_id: &str,
        operator: &Operator,
        comments: &str,
    ) -> Result<ActionResult> {
        self.update("approve", request_id, RequestStatus::Approved, Some(comments))?;
        Ok(ActionResult {
            message: Some(format!("approved by {}", operator.name)),
            status: Some(RequestStatus::Approved),
            ..ActionResult::default()
        })
    }

    async fn reject(
        &self,
        request_id: &str,
        operator: &Operator,
        reason: &str,
    ) -> Result<ActionResult> {
        self.update("reject", request_id, RequestStatus::Rejected, Some(reason))?;
        Ok(ActionResult {
            message: Some(format!("rejected by {}", operator.name)),
            status: Some(RequestStatus::Rejected),
            ..ActionResult::default()
        })
    }

    async fn cancel(&self, request_id: &str) -> Result<()> {
        self.update("cancel", request_id, RequestStatus::Cancelled, None)
    }
}
