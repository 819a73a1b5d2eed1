use serde::{Deserialize, Serialize};

use crate::models::course::CourseId;
use crate::models::trainer::TrainerId;

/// A (trainer, course) pairing. Upstream is expected to keep at most one per
/// course; the reconciler tolerates more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default, alias = "trainerCourseId")]
    pub id: Option<i64>,
    #[serde(alias = "trainerUserId")]
    pub trainer_id: TrainerId,
    #[serde(alias = "courseId")]
    pub course_id: CourseId,
    #[serde(default, alias = "assignmentDate")]
    pub assigned_on: Option<String>,
}

impl Assignment {
    pub fn new(trainer_id: TrainerId, course_id: CourseId) -> Self {
        Self {
            id: None,
            trainer_id,
            course_id,
            assigned_on: None,
        }
    }
}
