//! Plan catalogue routes: public browsing and operator maintenance.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireOperator;
use crate::models::plan::{CreatePlan, Plan, UpdatePlan};
use crate::services::plan as plan_service;
use crate::AppState;

/// GET /api/v1/plans — active plans, cheapest first.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Plan>>>, AppError> {
    let plans = plan_service::list_active(&state.db).await?;
    Ok(ApiResponse::success(plans))
}

/// GET /api/v1/plans/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Plan>>, AppError> {
    let plan = plan_service::find_active_by_slug(&state.db, &slug).await?;
    Ok(ApiResponse::success(plan))
}

/// GET /api/v1/admin/plans — every plan, retired ones included.
pub async fn list_all(
    State(state): State<AppState>,
    RequireOperator(_operator): RequireOperator,
) -> Result<Json<ApiResponse<Vec<Plan>>>, AppError> {
    let plans = plan_service::list_all(&state.db).await?;
    Ok(ApiResponse::success(plans))
}

/// POST /api/v1/admin/plans
pub async fn create(
    State(state): State<AppState>,
    RequireOperator(_operator): RequireOperator,
    Json(body): Json<CreatePlan>,
) -> Result<Json<ApiResponse<Plan>>, AppError> {
    let plan = plan_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(plan))
}

/// PUT /api/v1/admin/plans/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireOperator(_operator): RequireOperator,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePlan>,
) -> Result<Json<ApiResponse<Plan>>, AppError> {
    let plan = plan_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(plan))
}

/// DELETE /api/v1/admin/plans/{id} — soft delete.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireOperator(_operator): RequireOperator,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Plan>>, AppError> {
    let plan = plan_service::deactivate(&state.db, id).await?;
    Ok(ApiResponse::success(plan))
}
