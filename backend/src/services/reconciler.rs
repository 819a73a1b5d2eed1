use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::admin_api::AdminApi;
use crate::models::{Assignment, CourseId, CourseListing, CourseView, Trainer, TrainerId, TrainerSummary};
use crate::services::bounded;
use crate::status::{CourseStatus, derive_status};

/// The record that counts for `course_id`: the last one upstream returned.
pub fn resolve_assignment(course_id: CourseId, assignments: &[Assignment]) -> Option<&Assignment> {
    assignments.iter().rev().find(|a| a.course_id == course_id)
}

pub fn resolve_trainer(course_id: CourseId, assignments: &[Assignment]) -> Option<TrainerId> {
    resolve_assignment(course_id, assignments).map(|a| a.trainer_id)
}

/// Records of other trainers that the resolved one supersedes, one per
/// trainer.
pub fn superseded_assignments(course_id: CourseId, assignments: &[Assignment]) -> Vec<&Assignment> {
    let Some(kept) = resolve_trainer(course_id, assignments) else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    assignments
        .iter()
        .filter(|a| a.course_id == course_id && a.trainer_id != kept)
        .filter(|a| seen.insert(a.trainer_id))
        .collect()
}

/// A course from the listing after its duplicate rows were merged.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedCourse {
    pub listing: CourseListing,
    pub rows: usize,
}

impl CollapsedCourse {
    /// The listing's embedded trainer, trusted only when the course came back
    /// as a single row. Duplicate rows come from a join whose order upstream
    /// does not fix.
    fn embedded_trainer(&self) -> Option<TrainerSummary> {
        if self.rows == 1 {
            self.listing.trainer.clone()
        } else {
            None
        }
    }
}

/// Merges rows sharing a course id. A course keeps the position of its first
/// row while the contents of its last row win.
pub fn collapse_listing(listing: Vec<CourseListing>) -> Vec<CollapsedCourse> {
    let mut positions: HashMap<CourseId, usize> = HashMap::new();
    let mut courses: Vec<CollapsedCourse> = Vec::with_capacity(listing.len());

    for row in listing {
        match positions.get(&row.id) {
            Some(&idx) => {
                let course = &mut courses[idx];
                course.listing = row;
                course.rows += 1;
            }
            None => {
                positions.insert(row.id, courses.len());
                courses.push(CollapsedCourse { listing: row, rows: 1 });
            }
        }
    }

    for course in courses.iter().filter(|c| c.rows > 1) {
        warn!(
            "Course {} appeared in {} listing rows; keeping the last",
            course.listing.id, course.rows
        );
    }
    courses
}

fn summary_from_trainer(trainer: &Trainer) -> TrainerSummary {
    TrainerSummary {
        trainer_id: Some(trainer.id),
        first_name: trainer.first_name.clone(),
        last_name: trainer.last_name.clone(),
        email: trainer.email.clone(),
    }
}

/// Builds course cards: one trainer per course at most, and an enrolled count
/// even when upstream leaves its aggregate empty.
pub struct Reconciler {
    api: Arc<dyn AdminApi>,
    fetch_timeout: Duration,
}

impl Reconciler {
    pub fn new(api: Arc<dyn AdminApi>, fetch_timeout: Duration) -> Self {
        Self { api, fetch_timeout }
    }

    /// Fetches the listing and reconciles it. A failed listing yields no
    /// courses rather than an error.
    pub async fn load_courses(&self, now: DateTime<Utc>) -> Vec<CourseView> {
        let listing = match bounded(self.fetch_timeout, self.api.fetch_courses_with_trainers()).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Course listing unavailable: {}", e);
                return Vec::new();
            }
        };
        self.reconcile(listing, now).await
    }

    /// Output covers every distinct input course, in input order.
    pub async fn reconcile(&self, listing: Vec<CourseListing>, now: DateTime<Utc>) -> Vec<CourseView> {
        let courses = collapse_listing(listing);
        let directory = self.trainer_directory().await;

        let views = join_all(
            courses
                .iter()
                .map(|course| self.reconcile_course(course, &directory, now)),
        )
        .await;

        info!("Reconciled {} courses", views.len());
        views
    }

    async fn reconcile_course(
        &self,
        course: &CollapsedCourse,
        directory: &HashMap<TrainerId, Trainer>,
        now: DateTime<Utc>,
    ) -> CourseView {
        let listing = &course.listing;
        let (trainer, enrolled_count, material_links) = tokio::join!(
            self.resolve_course_trainer(course, directory),
            self.resolve_count(listing.id, listing.enrolled_aggregate),
            self.material_links(listing.id),
        );

        CourseView {
            id: listing.id,
            title: listing.title.clone(),
            description: listing.description.clone(),
            start_date: listing.start_date.clone(),
            end_date: listing.end_date.clone(),
            capacity: listing.capacity,
            status: derive_status(&listing.start_date, &listing.end_date, now).status,
            status_hint: listing.status_hint.as_deref().and_then(CourseStatus::from_hint),
            enrolled_count,
            material_links,
            trainer,
        }
    }

    /// The aggregate when it is positive, otherwise the size of the course
    /// roster, otherwise zero.
    pub async fn resolve_count(&self, course_id: CourseId, primary: Option<i64>) -> u64 {
        if let Some(count) = primary.filter(|count| *count > 0) {
            return count as u64;
        }

        match bounded(self.fetch_timeout, self.api.fetch_course_roster(course_id)).await {
            Ok(roster) => {
                debug!("Course {} enrolled count from roster: {}", course_id, roster.len());
                roster.len() as u64
            }
            Err(e) => {
                warn!("Roster fallback failed for course {}: {}", course_id, e);
                0
            }
        }
    }

    async fn resolve_course_trainer(
        &self,
        course: &CollapsedCourse,
        directory: &HashMap<TrainerId, Trainer>,
    ) -> Option<TrainerSummary> {
        let course_id = course.listing.id;
        let assignments = match bounded(self.fetch_timeout, self.api.fetch_assignments_by_course(course_id)).await {
            Ok(assignments) => assignments,
            Err(e) => {
                warn!("Assignments unavailable for course {}: {}", course_id, e);
                return course.embedded_trainer();
            }
        };

        let records = assignments.iter().filter(|a| a.course_id == course_id).count();
        if records > 1 {
            warn!(
                "Course {} has {} assignment records; the last one wins",
                course_id, records
            );
        }

        let trainer_id = resolve_trainer(course_id, &assignments)?;
        if let Some(trainer) = directory.get(&trainer_id) {
            return Some(summary_from_trainer(trainer));
        }

        let summary = match course.embedded_trainer() {
            Some(embedded) => TrainerSummary {
                trainer_id: Some(trainer_id),
                ..embedded
            },
            None => TrainerSummary {
                trainer_id: Some(trainer_id),
                first_name: String::new(),
                last_name: String::new(),
                email: String::new(),
            },
        };
        Some(summary)
    }

    async fn material_links(&self, course_id: CourseId) -> Vec<String> {
        match bounded(self.fetch_timeout, self.api.fetch_materials(course_id)).await {
            Ok(materials) => materials
                .into_iter()
                .map(|m| m.url)
                .filter(|url| !url.trim().is_empty())
                .collect(),
            Err(e) => {
                warn!("Materials unavailable for course {}: {}", course_id, e);
                Vec::new()
            }
        }
    }

    async fn trainer_directory(&self) -> HashMap<TrainerId, Trainer> {
        match bounded(self.fetch_timeout, self.api.fetch_trainers()).await {
            Ok(trainers) => trainers.into_iter().map(|t| (t.id, t)).collect(),
            Err(e) => {
                warn!("Trainer directory unavailable: {}", e);
                HashMap::new()
            }
        }
    }
}
