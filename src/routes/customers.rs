//! Customer record routes for support staff.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::{RequireAdmin, RequireSupport};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::user::{UpdateUser, UserResponse};
use crate::services::customer::{self as customer_service, CustomerDetail, CustomerFilters};
use crate::AppState;

/// GET /api/v1/admin/customers
pub async fn list(
    State(state): State<AppState>,
    RequireSupport(_staff): RequireSupport,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<CustomerFilters>,
) -> Result<Json<ApiResponse<PagedResult<UserResponse>>>, AppError> {
    let result = customer_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/admin/customers/{id}
pub async fn detail(
    State(state): State<AppState>,
    RequireSupport(_staff): RequireSupport,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerDetail>>, AppError> {
    let detail = customer_service::detail(&state.db, id).await?;
    Ok(ApiResponse::success(detail))
}

/// PATCH /api/v1/admin/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let customer = customer_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(customer))
}
