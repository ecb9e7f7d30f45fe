//! Customer records as seen by support staff.

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::user::{UpdateUser, User, UserResponse, UserRole};
use crate::services::auth;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CustomerFilters {
    pub active: Option<bool>,
    /// Matches name, email, or phone.
    pub search: Option<String>,
}

/// A customer with counts of their related records.
#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: UserResponse,
    pub order_count: i64,
    pub active_subscription_count: i64,
    pub open_ticket_count: i64,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &CustomerFilters) {
    qb.push(" WHERE role = ").push_bind(UserRole::Customer);
    if let Some(is_active) = filters.active {
        qb.push(" AND is_active = ").push_bind(is_active);
    }
    if let Some(search) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        qb.push(" AND (full_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR phone ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub async fn list(
    pool: &PgPool,
    filters: &CustomerFilters,
    pagination: &Pagination,
) -> Result<PagedResult<UserResponse>, AppError> {
    let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
    push_filters(&mut count_qb, filters);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let window = pagination.window();
    let mut data_qb = QueryBuilder::<Postgres>::new("SELECT * FROM users");
    push_filters(&mut data_qb, filters);
    data_qb
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
    let users = data_qb.build_query_as::<User>().fetch_all(pool).await?;

    Ok(PagedResult::new(
        users.into_iter().map(UserResponse::from).collect(),
        total,
        window,
    ))
}

async fn find_customer(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    let user = auth::find_user_by_id(pool, id).await?;
    if user.role != UserRole::Customer {
        return Err(AppError::NotFound("Customer not found".to_string()));
    }
    Ok(user)
}

pub async fn detail(pool: &PgPool, id: Uuid) -> Result<CustomerDetail, AppError> {
    let customer = find_customer(pool, id).await?;

    let (order_count, active_subscription_count, open_ticket_count) =
        sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM orders WHERE customer_id = $1),
                (SELECT COUNT(*) FROM subscriptions WHERE customer_id = $1 AND status = 'active'),
                (SELECT COUNT(*) FROM tickets
                    WHERE customer_id = $1 AND status IN ('pending', 'in_progress'))
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(CustomerDetail {
        customer: customer.into(),
        order_count,
        active_subscription_count,
        open_ticket_count,
    })
}

/// Update a customer's profile, active flag, or role.
pub async fn update(pool: &PgPool, id: Uuid, input: &UpdateUser) -> Result<UserResponse, AppError> {
    find_customer(pool, id).await?;
    let user = auth::update_user(pool, id, input).await?;
    tracing::info!(customer_id = %id, role = ?user.role, is_active = user.is_active, "Customer updated");
    Ok(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_scoped_to_customers() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM users");
        push_filters(&mut qb, &CustomerFilters::default());
        assert_eq!(qb.sql().to_string(), "SELECT * FROM users WHERE role = $1");
    }

    #[test]
    fn search_covers_name_email_phone() {
        let filters = CustomerFilters {
            active: Some(true),
            search: Some("0412".to_string()),
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM users");
        push_filters(&mut qb, &filters);
        let sql = qb.sql().to_string();
        assert!(sql.contains("is_active = $2"));
        assert!(sql.contains("full_name ILIKE $3"));
        assert!(sql.contains("phone ILIKE $5"));
    }
}
