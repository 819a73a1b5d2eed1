use serde::{Deserialize, Serialize};

pub type LearnerId = i64;

/// Entry of a course's enrollment roster; only its count matters here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(alias = "userId")]
    pub id: LearnerId,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
    #[serde(alias = "userId")]
    pub id: LearnerId,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default, alias = "currentCourse")]
    pub current_course: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, alias = "enrollmentDate")]
    pub enrollment_date: Option<String>,
}

impl Learner {
    /// Case-insensitive match on names, email and current course.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.current_course,
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }
}
