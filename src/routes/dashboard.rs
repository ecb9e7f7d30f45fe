//! Admin dashboard route: headline metrics, trends, and activity feeds.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::errors::DashboardError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::{self, OPERATOR_ROLES};
use crate::services::dashboard::{self, CACHE_CONTROL};
use crate::AppState;

/// GET /api/v1/admin/dashboard — admin and ops only.
///
/// Responds with a flat body rather than the API envelope; failures are
/// `{"error": "Unauthorized"}` (401) or `{"success": false, "error": ...}` (500).
pub async fn admin_dashboard(
    State(state): State<AppState>,
    session: Option<CurrentUser>,
) -> Result<Response, DashboardError> {
    let user = rbac::authorize(session.as_ref(), OPERATOR_ROLES)
        .map_err(|_| DashboardError::Unauthorized)?;

    let now = Utc::now();
    let payload = dashboard::get_dashboard(state.store.as_ref(), now)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "Dashboard aggregation failed");
            DashboardError::Upstream {
                detail: (!state.config.is_production()).then(|| e.to_string()),
            }
        })?;

    tracing::debug!(user_id = %user.id, role = ?user.role, "Dashboard served");
    Ok(([(header::CACHE_CONTROL, CACHE_CONTROL)], Json(payload)).into_response())
}
