use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::admin_api::AdminApi;
use crate::error::AppError;
use crate::models::{Assignment, CourseId, TrainerId};
use crate::services::{bounded, resolve_assignment};

/// Assigning is a replace: afterwards the course has exactly one trainer.
pub struct AssignmentService {
    api: Arc<dyn AdminApi>,
    fetch_timeout: Duration,
}

impl AssignmentService {
    pub fn new(api: Arc<dyn AdminApi>, fetch_timeout: Duration) -> Self {
        Self { api, fetch_timeout }
    }

    pub async fn current_assignment(&self, course_id: CourseId) -> Result<Option<Assignment>, AppError> {
        let assignments = bounded(self.fetch_timeout, self.api.fetch_assignments_by_course(course_id)).await?;
        Ok(resolve_assignment(course_id, &assignments).cloned())
    }

    pub async fn assign(&self, trainer_id: TrainerId, course_id: CourseId) -> Result<Assignment, AppError> {
        info!("Assigning trainer {} to course {}", trainer_id, course_id);

        match bounded(self.fetch_timeout, self.api.assign_trainer(trainer_id, course_id)).await {
            Ok(assignment) => Ok(assignment),
            // Upstream refuses to assign a trainer who already holds the course.
            Err(AppError::UpstreamStatus { status, body }) if status == 400 || status == 409 => {
                self.settle_existing(trainer_id, course_id)
                    .await?
                    .ok_or(AppError::UpstreamStatus { status, body })
            }
            Err(e) => Err(e),
        }
    }

    /// Makes an existing record for `trainer_id` the only one on the course.
    /// `None` if the trainer holds no record there.
    async fn settle_existing(
        &self,
        trainer_id: TrainerId,
        course_id: CourseId,
    ) -> Result<Option<Assignment>, AppError> {
        let assignments = bounded(self.fetch_timeout, self.api.fetch_assignments_by_course(course_id)).await?;
        let course_records: Vec<&Assignment> = assignments.iter().filter(|a| a.course_id == course_id).collect();

        let Some(kept) = course_records.iter().rev().find(|a| a.trainer_id == trainer_id) else {
            return Ok(None);
        };
        let kept = (*kept).clone();

        let mut stale_trainers = HashSet::new();
        let mut removed = 0;
        let mut first_failure = None;
        for stale in course_records.iter().filter(|a| a.trainer_id != trainer_id) {
            if !stale_trainers.insert(stale.trainer_id) {
                continue;
            }
            warn!(
                "Removing superseded trainer {} from course {}",
                stale.trainer_id, course_id
            );
            match bounded(self.fetch_timeout, self.api.remove_assignment(course_id, stale.trainer_id)).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    error!(
                        "Failed to remove trainer {} from course {}: {}",
                        stale.trainer_id, course_id, e
                    );
                    first_failure.get_or_insert(e);
                }
            }
        }

        // Every removal is attempted; the caller learns about the first failure.
        if let Some(e) = first_failure {
            warn!(
                "Course {} still has superseded trainers; removed {} of {}",
                course_id,
                removed,
                stale_trainers.len()
            );
            return Err(e);
        }

        info!("Trainer {} already assigned to course {}", trainer_id, course_id);
        Ok(Some(kept))
    }
}
