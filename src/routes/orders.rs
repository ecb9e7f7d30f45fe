//! Order routes: placement by customers, fulfilment by staff.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::{self, RequireOperator, RequireSupport, CUSTOMER_ROLES};
use crate::models::order::{Order, OrderStatusUpdate, OrderSummary, PlaceOrder};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::order::{self as order_service, OrderFilters};
use crate::AppState;

/// POST /api/v1/orders — customer places an order.
pub async fn place(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<PlaceOrder>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    rbac::authorize(Some(&current_user), CUSTOMER_ROLES).map_err(|_| AppError::Unauthorized)?;
    let order =
        order_service::place(&state.db, current_user.id, &body, state.config.tax_rate_bps).await?;
    Ok(ApiResponse::success(order))
}

/// GET /api/v1/account/orders — the caller's own orders.
pub async fn list_mine(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Order>>>, AppError> {
    let orders = order_service::list_for_customer(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/v1/admin/orders — paginated, filterable order list.
pub async fn list(
    State(state): State<AppState>,
    RequireSupport(_staff): RequireSupport,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<OrderFilters>,
) -> Result<Json<ApiResponse<PagedResult<OrderSummary>>>, AppError> {
    let result = order_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// PATCH /api/v1/admin/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireOperator(_operator): RequireOperator,
    Path(id): Path<Uuid>,
    Json(body): Json<OrderStatusUpdate>,
) -> Result<Json<ApiResponse<Order>>, AppError> {
    let order = order_service::update_status(&state.db, id, body.status).await?;
    Ok(ApiResponse::success(order))
}
