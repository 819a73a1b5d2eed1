pub mod assignment;
pub mod dashboard;
pub mod reconciler;
pub mod schedule;

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

pub use assignment::AssignmentService;
pub use dashboard::DashboardService;
pub use reconciler::{
    CollapsedCourse, Reconciler, collapse_listing, resolve_assignment, resolve_trainer,
    superseded_assignments,
};
pub use schedule::{ScheduleService, active_count, sort_schedule};

/// Runs one upstream call under a deadline; running out of time is reported
/// as `AppError::Timeout`.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout),
    }
}
