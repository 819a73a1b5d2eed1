use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::put;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;
use crate::models::*;
use crate::services::{AssignmentService, DashboardService, Reconciler, ScheduleService, bounded};
use crate::state::AppState;

#[derive(Deserialize)]
struct LearnerQueryParams {
    #[serde(default)]
    q: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", put(update_course).delete(delete_course))
        .route("/courses/{id}/trainer", get(course_trainer).put(assign_trainer))
        .route("/trainers", get(list_trainers))
        .route("/trainers/{id}/schedule", get(trainer_schedule))
        .route("/learners", get(list_learners))
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    bounded(state.fetch_timeout, state.api.fetch_dashboard_summary()).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<CourseView>> {
    let reconciler = Reconciler::new(state.api.clone(), state.fetch_timeout);
    Json(reconciler.load_courses(Utc::now()).await)
}

fn validate_course(input: &CourseInput) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    if let Some(capacity) = input.max_capacity {
        if capacity < 0 {
            return Err(AppError::BadRequest("capacity must not be negative".to_string()));
        }
    }
    Ok(())
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CourseInput>
) -> Result<Json<CourseRecord>, AppError> {
    validate_course(&req)?;
    let course = bounded(state.fetch_timeout, state.api.create_course(&req)).await?;
    Ok(Json(course))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
    Json(req): Json<CourseInput>
) -> Result<Json<CourseRecord>, AppError> {
    validate_course(&req)?;
    let course = bounded(state.fetch_timeout, state.api.update_course(id, &req)).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>
) -> Result<StatusCode, AppError> {
    bounded(state.fetch_timeout, state.api.delete_course(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn course_trainer(
    State(state): State<AppState>,
    Path(id): Path<CourseId>
) -> Result<Json<Assignment>, AppError> {
    let service = AssignmentService::new(state.api.clone(), state.fetch_timeout);
    let assignment = service
        .current_assignment(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(assignment))
}

async fn assign_trainer(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
    Json(req): Json<AssignTrainerRequest>
) -> Result<Json<Assignment>, AppError> {
    let service = AssignmentService::new(state.api.clone(), state.fetch_timeout);
    let assignment = service.assign(req.trainer_id, id).await?;
    Ok(Json(assignment))
}

async fn list_trainers(State(state): State<AppState>) -> Json<Vec<TrainerView>> {
    let service = ScheduleService::new(state.api.clone(), state.fetch_timeout);
    Json(service.list_trainers(Utc::now()).await)
}

async fn trainer_schedule(
    State(state): State<AppState>,
    Path(id): Path<TrainerId>
) -> Json<Vec<ScheduleEntry>> {
    let service = ScheduleService::new(state.api.clone(), state.fetch_timeout);
    Json(service.build_schedule(id, Utc::now()).await)
}

async fn list_learners(
    State(state): State<AppState>,
    Query(params): Query<LearnerQueryParams>
) -> Json<Vec<Learner>> {
    let learners = match bounded(state.fetch_timeout, state.api.fetch_learners()).await {
        Ok(learners) => learners,
        Err(e) => {
            warn!("Learners unavailable: {}", e);
            Vec::new()
        }
    };

    let query = params.q.unwrap_or_default();
    Json(learners.into_iter().filter(|l| l.matches(&query)).collect())
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let service = DashboardService::new(state.api.clone(), state.fetch_timeout);
    Json(service.summary().await)
}
