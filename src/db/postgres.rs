//! PostgreSQL-backed `DashboardStore`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::filters::{InvoiceFilter, SubscriptionFilter, TicketFilter, TimeWindow, UserFilter};
use super::store::{DashboardStore, InstallationActivity, OrderActivity, TicketActivity};
use super::StoreError;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `AND column >= start AND column < end`.
fn push_window(qb: &mut QueryBuilder<'_, Postgres>, column: &str, window: &TimeWindow) {
    qb.push(format!(" AND {column} >= "))
        .push_bind(window.start)
        .push(format!(" AND {column} < "))
        .push_bind(window.end);
}

fn user_count_query(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE TRUE");
    if let Some(role) = filter.role {
        qb.push(" AND role = ").push_bind(role);
    }
    if let Some(window) = &filter.created_in {
        push_window(&mut qb, "created_at", window);
    }
    qb
}

fn subscription_count_query(filter: &SubscriptionFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM subscriptions WHERE TRUE");
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(window) = &filter.period_start_in {
        push_window(&mut qb, "current_period_start", window);
    }
    if let Some(window) = &filter.cancelled_in {
        push_window(&mut qb, "cancelled_at", window);
    }
    qb
}

fn invoice_sum_query(filter: &InvoiceFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT COALESCE(SUM(grand_total_cents), 0)::BIGINT FROM invoices WHERE TRUE",
    );
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(window) = &filter.issued_in {
        push_window(&mut qb, "issued_at", window);
    }
    qb
}

fn ticket_count_query(filter: &TicketFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM tickets WHERE TRUE");
    if !filter.statuses.is_empty() {
        qb.push(" AND status IN (");
        let mut separated = qb.separated(", ");
        for status in &filter.statuses {
            separated.push_bind(*status);
        }
        separated.push_unseparated(")");
    }
    if let Some(window) = &filter.created_in {
        push_window(&mut qb, "created_at", window);
    }
    qb
}

#[async_trait]
impl DashboardStore for PgStore {
    async fn count_users(&self, filter: &UserFilter) -> Result<i64, StoreError> {
        let count = user_count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_subscriptions(&self, filter: &SubscriptionFilter) -> Result<i64, StoreError> {
        let count = subscription_count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn sum_invoice_totals(&self, filter: &InvoiceFilter) -> Result<i64, StoreError> {
        let total = invoice_sum_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn count_tickets(&self, filter: &TicketFilter) -> Result<i64, StoreError> {
        let count = ticket_count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderActivity>, StoreError> {
        let rows = sqlx::query_as::<_, OrderActivity>(
            r#"
            SELECT
                o.id, o.order_number,
                u.full_name AS customer_name,
                u.email     AS customer_email,
                p.name      AS plan_name,
                o.status, o.payment_status, o.grand_total_cents, o.created_at
            FROM orders o
            LEFT JOIN users u ON u.id = o.customer_id
            LEFT JOIN plans p ON p.id = o.plan_id
            ORDER BY o.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn recent_tickets(&self, limit: i64) -> Result<Vec<TicketActivity>, StoreError> {
        let rows = sqlx::query_as::<_, TicketActivity>(
            r#"
            SELECT
                t.id, t.ticket_number, t.subject,
                u.full_name AS customer_name,
                t.status, t.priority, t.category, t.created_at
            FROM tickets t
            LEFT JOIN users u ON u.id = t.customer_id
            ORDER BY t.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn upcoming_installations(
        &self,
        from: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<InstallationActivity>, StoreError> {
        let rows = sqlx::query_as::<_, InstallationActivity>(
            r#"
            SELECT
                j.id,
                o.order_number,
                c.full_name AS customer_name,
                o.service_address,
                t.full_name AS technician_name,
                j.scheduled_start, j.scheduled_end, j.status
            FROM installation_jobs j
            LEFT JOIN orders o ON o.id = j.order_id
            LEFT JOIN users c ON c.id = j.customer_id
            LEFT JOIN users t ON t.id = j.technician_id
            WHERE j.scheduled_start >= $1
            ORDER BY j.scheduled_start ASC
            LIMIT $2
            "#,
        )
        .bind(from)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::models::billing::SubscriptionStatus;
    use crate::models::ticket::TicketStatus;
    use crate::models::user::UserRole;

    fn march() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn user_query_binds_role_and_window() {
        let filter = UserFilter {
            role: Some(UserRole::Customer),
            created_in: Some(march()),
        };
        let sql = user_count_query(&filter).sql().to_string();
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM users WHERE TRUE AND role = $1 \
             AND created_at >= $2 AND created_at < $3"
        );
    }

    #[test]
    fn unfiltered_queries_have_no_conditions() {
        let sql = subscription_count_query(&SubscriptionFilter::default()).sql().to_string();
        assert_eq!(sql, "SELECT COUNT(*) FROM subscriptions WHERE TRUE");
    }

    #[test]
    fn subscription_query_uses_cancelled_column() {
        let filter = SubscriptionFilter {
            status: Some(SubscriptionStatus::Active),
            period_start_in: None,
            cancelled_in: Some(march()),
        };
        let sql = subscription_count_query(&filter).sql().to_string();
        assert!(sql.contains("status = $1"));
        assert!(sql.contains("cancelled_at >= $2 AND cancelled_at < $3"));
        assert!(!sql.contains("current_period_start"));
    }

    #[test]
    fn ticket_query_expands_status_list() {
        let filter = TicketFilter {
            statuses: TicketStatus::OPEN.to_vec(),
            created_in: None,
        };
        let sql = ticket_count_query(&filter).sql().to_string();
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM tickets WHERE TRUE AND status IN ($1, $2)"
        );
    }

    #[test]
    fn invoice_sum_is_coalesced() {
        let sql = invoice_sum_query(&InvoiceFilter::default()).sql().to_string();
        assert!(sql.starts_with("SELECT COALESCE(SUM(grand_total_cents), 0)::BIGINT"));
    }
}
