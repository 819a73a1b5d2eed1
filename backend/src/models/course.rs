use serde::{Deserialize, Serialize};

use crate::models::trainer::TrainerId;
use crate::status::CourseStatus;

pub type CourseId = i64;

/// Trainer identity as shown on a course card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerSummary {
    pub trainer_id: Option<TrainerId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// One decoded row of the upstream "courses with trainers" listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseListing {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub capacity: Option<i64>,
    pub status_hint: Option<String>,
    pub trainer: Option<TrainerSummary>,
    pub enrolled_aggregate: Option<i64>,
}

/// A course as stored upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: Option<CourseId>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
    pub level: Option<String>,
}

/// Body of create/update requests. Read from the console in snake_case and
/// forwarded upstream in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct CourseInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, alias = "capacity")]
    pub max_capacity: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename(deserialize = "materialId"), default)]
    pub id: Option<i64>,
    #[serde(rename(deserialize = "materialUrl"))]
    pub url: String,
    #[serde(rename(deserialize = "materialDescription"), default)]
    pub description: Option<String>,
}

/// Render-ready course card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseView {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub capacity: Option<i64>,
    pub status: CourseStatus,
    /// The stored upstream status, if it names a known state.
    pub status_hint: Option<CourseStatus>,
    pub enrolled_count: u64,
    pub material_links: Vec<String>,
    pub trainer: Option<TrainerSummary>,
}
