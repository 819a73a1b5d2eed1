use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::admin_api::AdminApi;
use crate::models::DashboardSummary;
use crate::services::bounded;

pub struct DashboardService {
    api: Arc<dyn AdminApi>,
    fetch_timeout: Duration,
}

impl DashboardService {
    pub fn new(api: Arc<dyn AdminApi>, fetch_timeout: Duration) -> Self {
        Self { api, fetch_timeout }
    }

    /// Every counter is `None` when upstream can't be reached.
    pub async fn summary(&self) -> DashboardSummary {
        bounded(self.fetch_timeout, self.api.fetch_dashboard_summary())
            .await
            .unwrap_or_else(|e| {
                warn!("Dashboard summary unavailable: {}", e);
                DashboardSummary::default()
            })
    }
}
