//! Installation scheduling and field update routes.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::{RequireField, RequireOperator};
use crate::models::installation::{InstallationJob, InstallationStatusUpdate, ScheduleInstallation};
use crate::services::installation as installation_service;
use crate::AppState;

/// POST /api/v1/admin/installations
pub async fn schedule(
    State(state): State<AppState>,
    RequireOperator(_operator): RequireOperator,
    Json(body): Json<ScheduleInstallation>,
) -> Result<Json<ApiResponse<InstallationJob>>, AppError> {
    let job = installation_service::schedule(&state.db, &body).await?;
    Ok(ApiResponse::success(job))
}

/// GET /api/v1/installations/assigned — the calling technician's open jobs.
pub async fn assigned(
    State(state): State<AppState>,
    RequireField(user): RequireField,
) -> Result<Json<ApiResponse<Vec<InstallationJob>>>, AppError> {
    let jobs = installation_service::list_assigned(&state.db, user.id).await?;
    Ok(ApiResponse::success(jobs))
}

/// PATCH /api/v1/installations/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireField(user): RequireField,
    Path(id): Path<Uuid>,
    Json(body): Json<InstallationStatusUpdate>,
) -> Result<Json<ApiResponse<InstallationJob>>, AppError> {
    let job = installation_service::update_status(&state.db, &user, id, &body).await?;
    Ok(ApiResponse::success(job))
}
