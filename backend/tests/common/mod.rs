#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use admin_console::admin_api::AdminApi;
use admin_console::error::AppError;
use admin_console::models::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// In-memory admin API. Mirrors upstream's assign rule: a course loses its
/// previous trainer, and re-assigning the same trainer is rejected with 400.
#[derive(Default)]
pub struct FakeAdminApi {
    pub listing: Vec<CourseListing>,
    pub listing_fails: bool,
    pub courses: HashMap<CourseId, CourseRecord>,
    pub trainers: Vec<Trainer>,
    pub assignments: Mutex<Vec<Assignment>>,
    pub rosters: HashMap<CourseId, Vec<RosterEntry>>,
    pub failing_rosters: HashSet<CourseId>,
    pub failing_assignments: HashSet<CourseId>,
    pub failing_removals: HashSet<(CourseId, TrainerId)>,
    pub delays: HashMap<CourseId, Duration>,
    pub materials: HashMap<CourseId, Vec<Material>>,
    pub learners: Vec<Learner>,
    pub roster_calls: AtomicUsize,
    pub removed: Mutex<Vec<(CourseId, TrainerId)>>,
}

impl FakeAdminApi {
    pub fn with_assignments(mut self, records: Vec<Assignment>) -> Self {
        self.assignments = Mutex::new(records);
        self
    }

    pub fn roster_calls(&self) -> usize {
        self.roster_calls.load(Ordering::SeqCst)
    }

    async fn delay(&self, course_id: CourseId) {
        if let Some(delay) = self.delays.get(&course_id) {
            tokio::time::sleep(*delay).await;
        }
    }

    fn unavailable() -> AppError {
        AppError::UpstreamStatus {
            status: 503,
            body: "unavailable".to_string(),
        }
    }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    async fn fetch_courses_with_trainers(&self) -> Result<Vec<CourseListing>, AppError> {
        if self.listing_fails {
            return Err(Self::unavailable());
        }
        Ok(self.listing.clone())
    }

    async fn fetch_course(&self, course_id: CourseId) -> Result<Option<CourseRecord>, AppError> {
        Ok(self.courses.get(&course_id).cloned())
    }

    async fn create_course(&self, input: &CourseInput) -> Result<CourseRecord, AppError> {
        Ok(CourseRecord {
            id: Some(99),
            title: input.title.clone(),
            description: input.description.clone(),
            start_date: input.start_date.clone(),
            end_date: input.end_date.clone(),
            capacity: input.max_capacity,
            status: input.status.clone(),
            level: input.level.clone(),
        })
    }

    async fn update_course(&self, course_id: CourseId, input: &CourseInput) -> Result<CourseRecord, AppError> {
        let mut record = self.create_course(input).await?;
        record.id = Some(course_id);
        Ok(record)
    }

    async fn delete_course(&self, course_id: CourseId) -> Result<(), AppError> {
        if self.courses.contains_key(&course_id) {
            Ok(())
        } else {
            Err(AppError::UpstreamStatus {
                status: 404,
                body: String::new(),
            })
        }
    }

    async fn fetch_materials(&self, course_id: CourseId) -> Result<Vec<Material>, AppError> {
        Ok(self.materials.get(&course_id).cloned().unwrap_or_default())
    }

    async fn fetch_trainers(&self) -> Result<Vec<Trainer>, AppError> {
        Ok(self.trainers.clone())
    }

    async fn fetch_assignments_by_course(&self, course_id: CourseId) -> Result<Vec<Assignment>, AppError> {
        self.delay(course_id).await;
        if self.failing_assignments.contains(&course_id) {
            return Err(Self::unavailable());
        }
        let records = self.assignments.lock().unwrap();
        Ok(records.iter().filter(|a| a.course_id == course_id).cloned().collect())
    }

    async fn fetch_assignments_by_trainer(&self, trainer_id: TrainerId) -> Result<Vec<Assignment>, AppError> {
        let records = self.assignments.lock().unwrap();
        Ok(records.iter().filter(|a| a.trainer_id == trainer_id).cloned().collect())
    }

    async fn assign_trainer(&self, trainer_id: TrainerId, course_id: CourseId) -> Result<Assignment, AppError> {
        let mut records = self.assignments.lock().unwrap();
        if records
            .iter()
            .any(|a| a.course_id == course_id && a.trainer_id == trainer_id)
        {
            return Err(AppError::UpstreamStatus {
                status: 400,
                body: String::new(),
            });
        }
        records.retain(|a| a.course_id != course_id);
        let assignment = Assignment::new(trainer_id, course_id);
        records.push(assignment.clone());
        Ok(assignment)
    }

    async fn remove_assignment(&self, course_id: CourseId, trainer_id: TrainerId) -> Result<(), AppError> {
        if self.failing_removals.contains(&(course_id, trainer_id)) {
            return Err(Self::unavailable());
        }
        self.assignments
            .lock()
            .unwrap()
            .retain(|a| !(a.course_id == course_id && a.trainer_id == trainer_id));
        self.removed.lock().unwrap().push((course_id, trainer_id));
        Ok(())
    }

    async fn fetch_course_roster(&self, course_id: CourseId) -> Result<Vec<RosterEntry>, AppError> {
        self.roster_calls.fetch_add(1, Ordering::SeqCst);
        self.delay(course_id).await;
        if self.failing_rosters.contains(&course_id) {
            return Err(Self::unavailable());
        }
        Ok(self.rosters.get(&course_id).cloned().unwrap_or_default())
    }

    async fn fetch_learners(&self) -> Result<Vec<Learner>, AppError> {
        Ok(self.learners.clone())
    }

    async fn fetch_dashboard_summary(&self) -> Result<DashboardSummary, AppError> {
        Ok(DashboardSummary {
            total_learners: Some(12),
            total_trainers: Some(3),
            total_courses: Some(self.listing.len() as u64),
            active_courses: None,
        })
    }
}

pub fn at(raw: &str) -> DateTime<Utc> {
    admin_console::status::parse_instant(raw).expect("valid test instant")
}

pub fn listing(id: CourseId, start: &str, end: &str, aggregate: Option<i64>) -> CourseListing {
    CourseListing {
        id,
        title: format!("Course {}", id),
        description: String::new(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        capacity: Some(30),
        status_hint: None,
        trainer: None,
        enrolled_aggregate: aggregate,
    }
}

pub fn trainer(id: TrainerId, first_name: &str, last_name: &str) -> Trainer {
    Trainer {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone_number: None,
        age: None,
        location: None,
        experience: None,
    }
}

pub fn roster(size: usize) -> Vec<RosterEntry> {
    (0..size)
        .map(|i| RosterEntry {
            id: i as i64 + 1,
            first_name: Some(format!("Learner{}", i)),
            last_name: None,
            email: None,
        })
        .collect()
}

pub fn record(id: CourseId, title: &str, start: &str, end: &str) -> CourseRecord {
    CourseRecord {
        id: Some(id),
        title: title.to_string(),
        description: None,
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        capacity: Some(20),
        status: None,
        level: None,
    }
}

/// Answers every read with nothing and acknowledges every write.
pub struct NoopAdminApi;

#[async_trait]
impl AdminApi for NoopAdminApi {
    async fn fetch_courses_with_trainers(&self) -> Result<Vec<CourseListing>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_course(&self, _course_id: CourseId) -> Result<Option<CourseRecord>, AppError> {
        Ok(None)
    }

    async fn create_course(&self, input: &CourseInput) -> Result<CourseRecord, AppError> {
        Ok(CourseRecord {
            id: None,
            title: input.title.clone(),
            description: input.description.clone(),
            start_date: input.start_date.clone(),
            end_date: input.end_date.clone(),
            capacity: input.max_capacity,
            status: input.status.clone(),
            level: input.level.clone(),
        })
    }

    async fn update_course(&self, course_id: CourseId, input: &CourseInput) -> Result<CourseRecord, AppError> {
        let mut record = self.create_course(input).await?;
        record.id = Some(course_id);
        Ok(record)
    }

    async fn delete_course(&self, _course_id: CourseId) -> Result<(), AppError> {
        Ok(())
    }

    async fn fetch_materials(&self, _course_id: CourseId) -> Result<Vec<Material>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_trainers(&self) -> Result<Vec<Trainer>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_assignments_by_course(&self, _course_id: CourseId) -> Result<Vec<Assignment>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_assignments_by_trainer(&self, _trainer_id: TrainerId) -> Result<Vec<Assignment>, AppError> {
        Ok(Vec::new())
    }

    async fn assign_trainer(&self, trainer_id: TrainerId, course_id: CourseId) -> Result<Assignment, AppError> {
        Ok(Assignment::new(trainer_id, course_id))
    }

    async fn remove_assignment(&self, _course_id: CourseId, _trainer_id: TrainerId) -> Result<(), AppError> {
        Ok(())
    }

    async fn fetch_course_roster(&self, _course_id: CourseId) -> Result<Vec<RosterEntry>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_learners(&self) -> Result<Vec<Learner>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_dashboard_summary(&self) -> Result<DashboardSummary, AppError> {
        Ok(DashboardSummary::default())
    }
}
