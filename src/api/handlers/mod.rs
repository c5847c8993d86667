use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::dashboard::{DashboardError, Navigation};
use crate::models::*;
use crate::observer::Notification;

// ============================================================
// Responses
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProjectResponse {
    pub project: ProjectRecord,
    pub navigation: Navigation,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenProjectResponse {
    pub navigation: Navigation,
    pub notifications: Vec<Notification>,
}

// ============================================================
// Error Handling
// ============================================================

/// Validation messages are meant for the user and are returned as-is.
fn dashboard_error(e: DashboardError) -> (StatusCode, String) {
    match e {
        DashboardError::Validation(v) => {
            tracing::warn!("Validation error: {}", v);
            (StatusCode::BAD_REQUEST, v.to_string())
        }
        DashboardError::NotFound(_) => (StatusCode::NOT_FOUND, "Project not found".to_string()),
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Projects
// ============================================================

pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<ProjectRecord>> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.projects().to_vec())
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectRecord>, (StatusCode, String)> {
    let dashboard = state.dashboard.lock().await;
    dashboard
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Project not found".to_string()))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<CreateProjectResponse>), (StatusCode, String)> {
    let mut dashboard = state.dashboard.lock().await;

    let navigation = match dashboard.create_project(input).await {
        Ok(navigation) => navigation,
        Err(e) => {
            state.log.drain();
            return Err(dashboard_error(e));
        }
    };

    let project = dashboard
        .find(&navigation.project_id)
        .cloned()
        .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponse {
            project,
            navigation,
            notifications: state.log.drain(),
        }),
    ))
}

pub async fn open_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OpenProjectResponse>, (StatusCode, String)> {
    let dashboard = state.dashboard.lock().await;
    let navigation = dashboard.open_project(&id).map_err(dashboard_error)?;

    Ok(Json(OpenProjectResponse {
        navigation,
        notifications: state.log.drain(),
    }))
}

pub async fn get_current_project(
    State(state): State<AppState>,
) -> Result<Json<ProjectRecord>, (StatusCode, String)> {
    let dashboard = state.dashboard.lock().await;
    dashboard
        .current_project()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "No current project".to_string()))
}

// ============================================================
// Presentation
// ============================================================

pub async fn list_cards(State(state): State<AppState>) -> Json<Vec<CardSummary>> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.cards(Utc::now()))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.stats())
}
