use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::admin_api::AdminApi;
use crate::models::{CourseId, ScheduleEntry, TrainerId, TrainerView};
use crate::services::{bounded, resolve_trainer};
use crate::status::{derive_status, is_active, start_sort_key};

/// Active first, then upcoming, then completed; earlier starts first within
/// each group.
pub fn sort_schedule(entries: &mut [ScheduleEntry]) {
    entries.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| start_sort_key(&a.start_date).cmp(&start_sort_key(&b.start_date)))
    });
}

/// Entries running at `now`. Rows with unusable dates never count.
pub fn active_count(entries: &[ScheduleEntry], now: DateTime<Utc>) -> usize {
    entries
        .iter()
        .filter(|e| is_active(&e.start_date, &e.end_date, now))
        .count()
}

pub struct ScheduleService {
    api: Arc<dyn AdminApi>,
    fetch_timeout: Duration,
}

impl ScheduleService {
    pub fn new(api: Arc<dyn AdminApi>, fetch_timeout: Duration) -> Self {
        Self { api, fetch_timeout }
    }

    pub async fn build_schedule(&self, trainer_id: TrainerId, now: DateTime<Utc>) -> Vec<ScheduleEntry> {
        let assignments = match bounded(self.fetch_timeout, self.api.fetch_assignments_by_trainer(trainer_id)).await {
            Ok(assignments) => assignments,
            Err(e) => {
                warn!("Assignments unavailable for trainer {}: {}", trainer_id, e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let course_ids: Vec<CourseId> = assignments
            .iter()
            .filter(|a| a.trainer_id == trainer_id)
            .map(|a| a.course_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let mut entries: Vec<ScheduleEntry> = join_all(
            course_ids
                .into_iter()
                .map(|course_id| self.schedule_entry(trainer_id, course_id, now)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        sort_schedule(&mut entries);
        entries
    }

    /// `None` when the course has since been handed to another trainer.
    async fn schedule_entry(
        &self,
        trainer_id: TrainerId,
        course_id: CourseId,
        now: DateTime<Utc>,
    ) -> Option<ScheduleEntry> {
        let (course, assignments) = tokio::join!(
            bounded(self.fetch_timeout, self.api.fetch_course(course_id)),
            bounded(self.fetch_timeout, self.api.fetch_assignments_by_course(course_id)),
        );

        if let Ok(assignments) = assignments {
            if let Some(current) = resolve_trainer(course_id, &assignments) {
                if current != trainer_id {
                    debug!(
                        "Course {} now belongs to trainer {}; dropping it from trainer {}",
                        course_id, current, trainer_id
                    );
                    return None;
                }
            }
        }

        let fallback_title = format!("Course {}", course_id);
        let (course_title, start_date, end_date) = match course {
            Ok(Some(record)) => {
                let title = if record.title.trim().is_empty() {
                    fallback_title
                } else {
                    record.title
                };
                (
                    title,
                    record.start_date.unwrap_or_default(),
                    record.end_date.unwrap_or_default(),
                )
            }
            Ok(None) => (fallback_title, String::new(), String::new()),
            Err(e) => {
                warn!("Course {} unavailable for schedule: {}", course_id, e);
                (fallback_title, String::new(), String::new())
            }
        };

        let derived = derive_status(&start_date, &end_date, now);
        Some(ScheduleEntry {
            course_id,
            course_title,
            start_date,
            end_date,
            status: derived.status,
            sort_order: derived.sort_order,
        })
    }

    /// Trainer roster with "active now" counts. A trainer whose schedule can't
    /// be read shows zero.
    pub async fn list_trainers(&self, now: DateTime<Utc>) -> Vec<TrainerView> {
        let trainers = match bounded(self.fetch_timeout, self.api.fetch_trainers()).await {
            Ok(trainers) => trainers,
            Err(e) => {
                warn!("Trainer directory unavailable: {}", e);
                return Vec::new();
            }
        };

        join_all(trainers.into_iter().map(|trainer| async move {
            let schedule = self.build_schedule(trainer.id, now).await;
            TrainerView {
                active_now: active_count(&schedule, now),
                assigned_courses: schedule.len(),
                trainer,
            }
        }))
        .await
    }
}
