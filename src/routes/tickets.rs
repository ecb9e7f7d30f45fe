//! Support ticket routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireSupport;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};
use crate::services::ticket::{self as ticket_service, TicketFilters};
use crate::AppState;

/// POST /api/v1/tickets
pub async fn create(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreateTicket>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let ticket = ticket_service::create(&state.db, current_user.id, &body).await?;
    Ok(ApiResponse::success(ticket))
}

/// GET /api/v1/tickets — the caller's own tickets.
pub async fn list_mine(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Ticket>>>, AppError> {
    let tickets = ticket_service::list_for_customer(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(tickets))
}

/// GET /api/v1/admin/tickets
pub async fn list(
    State(state): State<AppState>,
    RequireSupport(_staff): RequireSupport,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<TicketFilters>,
) -> Result<Json<ApiResponse<PagedResult<Ticket>>>, AppError> {
    let result = ticket_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// PATCH /api/v1/admin/tickets/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireSupport(_staff): RequireSupport,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTicket>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let ticket = ticket_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(ticket))
}
