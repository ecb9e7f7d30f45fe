//! Route definitions for the ISP portal API.

pub mod account;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod installations;
pub mod orders;
pub mod plans;
pub mod tickets;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::AppState;

/// Largest request body the JSON extractors accept.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Every API route, bound to `state`. Tracing, CORS and compression are added by the caller.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/users", post(auth::create_user));

    let admin_routes = Router::new()
        .route("/dashboard", get(dashboard::admin_dashboard))
        .route("/plans", get(plans::list_all).post(plans::create))
        .route("/plans/{id}", put(plans::update).delete(plans::deactivate))
        .route("/orders", get(orders::list))
        .route("/orders/{id}/status", patch(orders::update_status))
        .route("/customers", get(customers::list))
        .route(
            "/customers/{id}",
            get(customers::detail).patch(customers::update),
        )
        .route("/tickets", get(tickets::list))
        .route("/tickets/{id}", patch(tickets::update))
        .route("/installations", post(installations::schedule));

    let account_routes = Router::new()
        .route("/dashboard", get(account::dashboard))
        .route("/orders", get(orders::list_mine))
        .route("/subscriptions", get(account::subscriptions))
        .route("/invoices", get(account::invoices))
        .route("/installations", get(account::installations));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .nest("/account", account_routes)
        .route("/plans", get(plans::list_active))
        .route("/plans/{slug}", get(plans::get_by_slug))
        .route("/orders", post(orders::place))
        .route("/tickets", get(tickets::list_mine).post(tickets::create))
        .route("/installations/assigned", get(installations::assigned))
        .route(
            "/installations/{id}/status",
            patch(installations::update_status),
        );

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
