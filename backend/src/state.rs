use std::sync::Arc;
use std::time::Duration;

use crate::admin_api::AdminApi;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn AdminApi>,
    pub fetch_timeout: Duration,
}
