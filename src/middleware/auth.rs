//! JWT session extractor for Axum handlers.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRole;
use crate::services::auth::{self as auth_service, ACCESS_TOKEN};
use crate::AppState;

/// Authenticated caller resolved from a Bearer access token.
///
/// Required session:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
/// Optional session (absent or invalid token yields `None`):
/// ```ignore
/// async fn handler(session: Option<CurrentUser>) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    fn from_token(token: &str, jwt_secret: &str) -> Result<Self, AppError> {
        let claims = auth_service::validate_token(token, jwt_secret)?;

        if claims.token_type != ACCESS_TOKEN {
            return Err(AppError::Unauthorized);
        }

        let id: Uuid = claims.sub.parse().map_err(|_| AppError::Unauthorized)?;

        Ok(CurrentUser {
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            <TypedHeader<Authorization<Bearer>> as FromRequestParts<AppState>>::from_request_parts(
                parts, state,
            )
            .await
            .map_err(|_| AppError::Unauthorized)?;

        CurrentUser::from_token(bearer.token(), &state.config.jwt_secret)
    }
}

impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let user = <CurrentUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .ok();
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::{issue_token, REFRESH_TOKEN};

    const SECRET: &str = "extractor-test-secret";

    #[test]
    fn access_token_resolves_session() {
        let id = Uuid::new_v4();
        let token = issue_token(id, "ops@example.net", UserRole::Ops, ACCESS_TOKEN, SECRET, 60)
            .unwrap();
        let user = CurrentUser::from_token(&token, SECRET).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, UserRole::Ops);
        assert_eq!(user.email, "ops@example.net");
    }

    #[test]
    fn refresh_token_is_not_a_session() {
        let token = issue_token(
            Uuid::new_v4(),
            "a@example.net",
            UserRole::Admin,
            REFRESH_TOKEN,
            SECRET,
            60,
        )
        .unwrap();
        assert!(CurrentUser::from_token(&token, SECRET)
            .unwrap_err()
            .is_unauthorized());
    }
}
