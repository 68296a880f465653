//! Application state management

use crate::api_client::HttpAdminService;
use crate::dashboard::{Dashboard, DashboardOptions};
use ridedesk_core::{Config, Result};
use std::time::Duration;

/// Application state holding configuration and the dashboard
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Dashboard bound to the HTTP admin service
    pub dashboard: Dashboard<HttpAdminService>,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let mut service = HttpAdminService::with_timeout(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.request_timeout_secs),
        )?;
        if let Some(ref api_key) = config.api.api_key {
            service = service.with_api_key(api_key.clone());
        }

        let dashboard = Dashboard::new(service, DashboardOptions::from_config(&config)?);

        Ok(Self { config, dashboard })
    }
}
