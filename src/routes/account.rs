//! Customer self-service routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::billing::{Invoice, SubscriptionWithPlan};
use crate::models::installation::InstallationJob;
use crate::services::account::{self as account_service, AccountSummary};
use crate::AppState;

/// GET /api/v1/account/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<AccountSummary>>, AppError> {
    let summary = account_service::summary(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/v1/account/subscriptions
pub async fn subscriptions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<SubscriptionWithPlan>>>, AppError> {
    let rows = account_service::subscriptions(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/v1/account/invoices
pub async fn invoices(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Invoice>>>, AppError> {
    let rows = account_service::invoices(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/v1/account/installations
pub async fn installations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<InstallationJob>>>, AppError> {
    let rows = account_service::installations(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(rows))
}
