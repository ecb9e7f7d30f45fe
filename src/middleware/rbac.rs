//! Role-based access control: the authorization gate and the Axum extractors
//! built on it.
//!
//! Missing sessions and disallowed roles both surface to the client as 401;
//! the distinction only shows up in the logs.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::AppState;

pub const ADMIN_ROLES: &[UserRole] = &[UserRole::Admin];

/// Admin dashboard, plan catalogue, and order fulfilment.
pub const OPERATOR_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Ops];

/// Tickets and customer records.
pub const SUPPORT_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Ops, UserRole::Support];

/// Placing orders.
pub const CUSTOMER_ROLES: &[UserRole] = &[UserRole::Customer];

/// Installation job updates.
pub const FIELD_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Ops, UserRole::Tech];

/// Why the gate refused a caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("no session")]
    MissingSession,

    #[error("role {0:?} not permitted")]
    RoleNotPermitted(UserRole),
}

/// Check that a session exists and its role is in `allowed`.
pub fn authorize<'a>(
    session: Option<&'a CurrentUser>,
    allowed: &[UserRole],
) -> Result<&'a CurrentUser, AccessDenied> {
    let user = session.ok_or_else(|| {
        tracing::warn!("Access denied: no session");
        AccessDenied::MissingSession
    })?;
    if !allowed.contains(&user.role) {
        tracing::warn!(user_id = %user.id, role = ?user.role, "Access denied: role not permitted");
        return Err(AccessDenied::RoleNotPermitted(user.role));
    }
    Ok(user)
}

async fn require(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[UserRole],
) -> Result<CurrentUser, AppError> {
    let session =
        <CurrentUser as axum::extract::OptionalFromRequestParts<AppState>>::from_request_parts(
            parts, state,
        )
        .await
        .unwrap_or(None);
    authorize(session.as_ref(), allowed)
        .map(Clone::clone)
        .map_err(|_| AppError::Unauthorized)
}

/// Extractor that requires the admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, ADMIN_ROLES).await.map(RequireAdmin)
    }
}

/// Extractor that requires admin or ops.
#[derive(Debug, Clone)]
pub struct RequireOperator(pub CurrentUser);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, OPERATOR_ROLES).await.map(RequireOperator)
    }
}

/// Extractor that requires admin, ops, or support.
#[derive(Debug, Clone)]
pub struct RequireSupport(pub CurrentUser);

impl FromRequestParts<AppState> for RequireSupport {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, SUPPORT_ROLES).await.map(RequireSupport)
    }
}

/// Extractor that requires admin, ops, or tech.
#[derive(Debug, Clone)]
pub struct RequireField(pub CurrentUser);

impl FromRequestParts<AppState> for RequireField {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, FIELD_ROLES).await.map(RequireField)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "someone@example.net".to_string(),
            role,
        }
    }

    #[test]
    fn missing_session_denied() {
        assert_eq!(
            authorize(None, OPERATOR_ROLES).unwrap_err(),
            AccessDenied::MissingSession
        );
    }

    #[test]
    fn operator_gate_admits_admin_and_ops_only() {
        for role in [UserRole::Admin, UserRole::Ops] {
            let user = session(role);
            assert!(authorize(Some(&user), OPERATOR_ROLES).is_ok());
        }
        for role in [
            UserRole::Visitor,
            UserRole::Customer,
            UserRole::Tech,
            UserRole::Support,
        ] {
            let user = session(role);
            assert_eq!(
                authorize(Some(&user), OPERATOR_ROLES).unwrap_err(),
                AccessDenied::RoleNotPermitted(role)
            );
        }
    }

    #[test]
    fn gate_returns_the_same_session() {
        let user = session(UserRole::Support);
        let admitted = authorize(Some(&user), SUPPORT_ROLES).unwrap();
        assert_eq!(admitted.id, user.id);
    }

    #[test]
    fn role_sets_nest() {
        for role in OPERATOR_ROLES {
            assert!(SUPPORT_ROLES.contains(role));
            assert!(FIELD_ROLES.contains(role));
        }
        assert!(!FIELD_ROLES.contains(&UserRole::Support));
        assert!(!SUPPORT_ROLES.contains(&UserRole::Tech));
        assert!(!CUSTOMER_ROLES.iter().any(|r| OPERATOR_ROLES.contains(r)));
    }
}
