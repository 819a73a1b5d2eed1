pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ConsoleConfig;
use crate::error::AppError;
use crate::models::{
    AssignPayload, Assignment, CourseId, CourseInput, CourseListing, CourseRecord,
    DashboardSummary, Learner, Material, RosterEntry, Trainer, TrainerId,
};

/// The upstream admin API as seen by the console.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn fetch_courses_with_trainers(&self) -> Result<Vec<CourseListing>, AppError>;
    async fn fetch_course(&self, course_id: CourseId) -> Result<Option<CourseRecord>, AppError>;
    async fn create_course(&self, input: &CourseInput) -> Result<CourseRecord, AppError>;
    async fn update_course(&self, course_id: CourseId, input: &CourseInput) -> Result<CourseRecord, AppError>;
    async fn delete_course(&self, course_id: CourseId) -> Result<(), AppError>;
    async fn fetch_materials(&self, course_id: CourseId) -> Result<Vec<Material>, AppError>;
    async fn fetch_trainers(&self) -> Result<Vec<Trainer>, AppError>;
    async fn fetch_assignments_by_course(&self, course_id: CourseId) -> Result<Vec<Assignment>, AppError>;
    async fn fetch_assignments_by_trainer(&self, trainer_id: TrainerId) -> Result<Vec<Assignment>, AppError>;
    /// Upstream is expected to drop any earlier assignment for the course.
    async fn assign_trainer(&self, trainer_id: TrainerId, course_id: CourseId) -> Result<Assignment, AppError>;
    async fn remove_assignment(&self, course_id: CourseId, trainer_id: TrainerId) -> Result<(), AppError>;
    async fn fetch_course_roster(&self, course_id: CourseId) -> Result<Vec<RosterEntry>, AppError>;
    async fn fetch_learners(&self) -> Result<Vec<Learner>, AppError>;
    async fn fetch_dashboard_summary(&self) -> Result<DashboardSummary, AppError>;
}

pub struct AdminHttpClient {
    client: Client,
    base_url: String,
}

impl AdminHttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, AppError> {
        Self::new(config.api_base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(path: &str, response: Response) -> Result<String, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("admin API {} answered {}", path, status);
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, AppError> {
        serde_json::from_str::<T>(body).map_err(|e| {
            tracing::error!("Failed to parse {}: {}", path, e);
            AppError::Decode(format!("{}: {}", path, e))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.client.get(self.url(path)).send().await?;
        let body = Self::read_body(path, response).await?;
        Self::decode(path, &body)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .request(method, self.url(path))
            .json(payload)
            .send()
            .await?;
        let body = Self::read_body(path, response).await?;
        Self::decode(path, &body)
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<(), AppError> {
        let response = self.client.request(method, self.url(path)).send().await?;
        Self::read_body(path, response).await?;
        Ok(())
    }

    async fn get_rows(&self, path: &str) -> Result<Vec<dto::Row>, AppError> {
        let values: Vec<Value> = self.get_json(path).await?;
        let mut rows = Vec::with_capacity(values.len());
        for value in values {
            match dto::Row::from_value(value) {
                Ok(row) => rows.push(row),
                Err(e) => tracing::warn!("Skipping malformed row from {}: {}", path, e),
            }
        }
        Ok(rows)
    }
}

#[async_trait]
impl AdminApi for AdminHttpClient {
    async fn fetch_courses_with_trainers(&self) -> Result<Vec<CourseListing>, AppError> {
        let rows = self.get_rows("/courses/with-trainers").await?;
        let mut courses = Vec::with_capacity(rows.len());

        for row in &rows {
            match dto::course_listing_from_row(row) {
                Ok(course) => courses.push(course),
                Err(e) => tracing::warn!("Failed to parse course row {:?}: {}", row, e),
            }
        }
        Ok(courses)
    }

    async fn fetch_course(&self, course_id: CourseId) -> Result<Option<CourseRecord>, AppError> {
        let path = format!("/courses/{}", course_id);
        let response = self.client.get(self.url(&path)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = Self::read_body(&path, response).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let wire: Option<dto::CourseRecordWire> = Self::decode(&path, &body)?;
        Ok(wire.map(CourseRecord::from))
    }

    async fn create_course(&self, input: &CourseInput) -> Result<CourseRecord, AppError> {
        let wire: dto::CourseRecordWire = self.send_json(Method::POST, "/courses", input).await?;
        Ok(wire.into())
    }

    async fn update_course(&self, course_id: CourseId, input: &CourseInput) -> Result<CourseRecord, AppError> {
        let path = format!("/courses/{}", course_id);
        let wire: dto::CourseRecordWire = self.send_json(Method::PUT, &path, input).await?;
        Ok(wire.into())
    }

    async fn delete_course(&self, course_id: CourseId) -> Result<(), AppError> {
        self.send_empty(Method::DELETE, &format!("/courses/{}", course_id)).await
    }

    async fn fetch_materials(&self, course_id: CourseId) -> Result<Vec<Material>, AppError> {
        self.get_json(&format!("/courses/{}/materials", course_id)).await
    }

    async fn fetch_trainers(&self) -> Result<Vec<Trainer>, AppError> {
        let rows = self.get_rows("/trainers").await?;
        let mut trainers = Vec::with_capacity(rows.len());

        for row in &rows {
            match dto::trainer_from_row(row) {
                Ok(trainer) => trainers.push(trainer),
                Err(e) => tracing::warn!("Failed to parse trainer row {:?}: {}", row, e),
            }
        }
        Ok(trainers)
    }

    async fn fetch_assignments_by_course(&self, course_id: CourseId) -> Result<Vec<Assignment>, AppError> {
        self.get_json(&format!("/trainers-courses/course/{}", course_id)).await
    }

    async fn fetch_assignments_by_trainer(&self, trainer_id: TrainerId) -> Result<Vec<Assignment>, AppError> {
        self.get_json(&format!("/trainers-courses/trainer/{}", trainer_id)).await
    }

    async fn assign_trainer(&self, trainer_id: TrainerId, course_id: CourseId) -> Result<Assignment, AppError> {
        let payload = AssignPayload {
            trainer_user_id: trainer_id,
            course_id,
        };
        self.send_json(Method::POST, "/trainers-courses/assign", &payload).await
    }

    async fn remove_assignment(&self, course_id: CourseId, trainer_id: TrainerId) -> Result<(), AppError> {
        let path = format!("/trainers-courses/remove/{}/{}", course_id, trainer_id);
        self.send_empty(Method::DELETE, &path).await
    }

    async fn fetch_course_roster(&self, course_id: CourseId) -> Result<Vec<RosterEntry>, AppError> {
        self.get_json(&format!("/enrollments/course/{}/learners", course_id)).await
    }

    async fn fetch_learners(&self) -> Result<Vec<Learner>, AppError> {
        self.get_json("/learners").await
    }

    async fn fetch_dashboard_summary(&self) -> Result<DashboardSummary, AppError> {
        self.get_json("/dashboard/summary").await
    }
}
