//! HTTP client for communicating with the admin service

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use ridedesk_core::types::{ApiEnvelope, Page};
use ridedesk_core::{ActionResult, Error, NewRequest, Operator, RequestRecord, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Operations the console needs from the admin service
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Fetch every request
    async fn list_requests(&self) -> Result<Vec<RequestRecord>>;

    /// Fetch a single request
    async fn get_request(&self, request_id: &str) -> Result<RequestRecord>;

    /// Create a request
    async fn create_request(&self, payload: &NewRequest) -> Result<()>;

    /// Approve a request on behalf of `operator`
    async fn approve(
        &self,
        request_id: &str,
        operator: &Operator,
        comments: &str,
    ) -> Result<ActionResult>;

    /// Reject a request on behalf of `operator`
    async fn reject(&self, request_id: &str, operator: &Operator, reason: &str)
    -> Result<ActionResult>;

    /// Cancel a request
    async fn cancel(&self, request_id: &str) -> Result<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveBody<'a> {
    admin_id: &'a str,
    admin_name: &'a str,
    admin_phone: &'a str,
    comments: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody<'a> {
    admin_name: &'a str,
    admin_phone: &'a str,
    reason: &'a str,
}

/// reqwest-backed [`AdminService`]
#[derive(Debug, Clone)]
pub struct HttpAdminService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAdminService {
    /// Create a new client with the default timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new client with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    /// Set the API key for authentication
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn requests_url(&self) -> String {
        format!("{}/api/admin/requests", self.base_url)
    }

    fn request_url(&self, request_id: &str, action: Option<&str>) -> String {
        let mut url = format!(
            "{}/{}",
            self.requests_url(),
            urlencoding::encode(request_id)
        );
        if let Some(action) = action {
            url.push('/');
            url.push_str(action);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, operation: &str, resource: &str) -> Result<Response> {
        let request = match self.api_key {
            Some(ref api_key) => request.header("X-API-Key", api_key),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to {operation}: {e}")))?;

        let status = response.status();
        debug!(operation, %status, "admin service responded");

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                resource: resource.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.chars().take(512).collect()
            };
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn read_body(response: Response, operation: &str) -> Result<String> {
        response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read {operation} response: {e}")))
    }

    async fn decode<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
        let body = Self::read_body(response, operation).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(operation, error = %e, "admin service sent an unreadable body");
            Error::Serialization(e)
        })
    }

    async fn action_result(response: Response, operation: &str) -> Result<ActionResult> {
        let body = Self::read_body(response, operation).await?;

        if body.trim().is_empty() {
            return Ok(ActionResult::default());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AdminService for HttpAdminService {
    async fn list_requests(&self) -> Result<Vec<RequestRecord>> {
        let request = self.client.get(self.requests_url());
        let response = self.send(request, "fetch requests", "requests").await?;

        let envelope: ApiEnvelope<Page<RequestRecord>> =
            Self::decode(response, "fetch requests").await?;

        Ok(envelope.data.content)
    }

    async fn get_request(&self, request_id: &str) -> Result<RequestRecord> {
        let request = self.client.get(self.request_url(request_id, None));
        let response = self
            .send(request, "fetch request", &format!("request {request_id}"))
            .await?;

        let envelope: ApiEnvelope<RequestRecord> = Self::decode(response, "fetch request").await?;

        Ok(envelope.data)
    }

    async fn create_request(&self, payload: &NewRequest) -> Result<()> {
        let request = self.client.post(self.requests_url()).json(payload);
        self.send(request, "create request", "requests").await?;
        Ok(())
    }

    async fn approve(
        &self,
        request_id: &str,
        operator: &Operator,
        comments: &str,
    ) -> Result<ActionResult> {
        let body = ApproveBody {
            admin_id: &operator.id,
            admin_name: &operator.name,
            admin_phone: &operator.phone,
            comments,
        };
        let request = self
            .client
            .post(self.request_url(request_id, Some("approve")))
            .json(&body);
        let response = self
            .send(request, "approve request", &format!("request {request_id}"))
            .await?;

        Self::action_result(response, "approve").await
    }

    async fn reject(
        &self,
        request_id: &str,
        operator: &Operator,
        reason: &str,
    ) -> Result<ActionResult> {
        let body = RejectBody {
            admin_name: &operator.name,
            admin_phone: &operator.phone,
            reason,
        };
        let request = self
            .client
            .post(self.request_url(request_id, Some("reject")))
            .json(&body);
        let response = self
            .send(request, "reject request", &format!("request {request_id}"))
            .await?;

        Self::action_result(response, "reject").await
    }

    async fn cancel(&self, request_id: &str) -> Result<()> {
        let request = self.client.post(self.request_url(request_id, Some("cancel")));
        self.send(request, "cancel request", &format!("request {request_id}"))
            .await?;
        Ok(())
    }
}
