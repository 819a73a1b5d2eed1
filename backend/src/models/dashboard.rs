use serde::{Deserialize, Serialize};

/// Headline counters. A `None` renders as "-" on the console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default, alias = "totalLearners")]
    pub total_learners: Option<u64>,
    #[serde(default, alias = "totalTrainers")]
    pub total_trainers: Option<u64>,
    #[serde(default, alias = "totalCourses")]
    pub total_courses: Option<u64>,
    #[serde(default, alias = "activeCourses")]
    pub active_courses: Option<u64>,
}
