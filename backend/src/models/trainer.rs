use serde::{Deserialize, Serialize};

use crate::models::course::CourseId;

pub type TrainerId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub experience: Option<String>,
}

/// Trainer card on the roster screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerView {
    #[serde(flatten)]
    pub trainer: Trainer,
    pub active_now: usize,
    pub assigned_courses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignTrainerRequest {
    pub trainer_id: TrainerId,
}

/// Upstream body for `POST /trainers-courses/assign`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPayload {
    pub trainer_user_id: TrainerId,
    pub course_id: CourseId,
}
