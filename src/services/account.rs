//! Customer self-service views over their own account.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::billing::{Invoice, InvoiceStatus, SubscriptionStatus, SubscriptionWithPlan};
use crate::models::installation::{InstallationJob, InstallationStatus};
use crate::models::ticket::TicketStatus;

/// Landing page summary for a signed-in customer.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub active_subscription: Option<SubscriptionWithPlan>,
    /// Sum of open invoices.
    pub outstanding_balance_cents: i64,
    pub open_tickets: i64,
    pub next_installation: Option<InstallationJob>,
}

const SUBSCRIPTION_WITH_PLAN: &str = "SELECT s.id, s.status, s.billing_cycle, \
     s.current_period_start, s.current_period_end, s.cancelled_at, s.plan_id, \
     p.name AS plan_name, p.download_mbps, p.upload_mbps, p.monthly_price_cents \
     FROM subscriptions s LEFT JOIN plans p ON p.id = s.plan_id";

pub async fn summary(pool: &PgPool, customer_id: Uuid) -> Result<AccountSummary, AppError> {
    let active_subscription_sql = format!(
        "{SUBSCRIPTION_WITH_PLAN} WHERE s.customer_id = $1 AND s.status = $2 \
         ORDER BY s.current_period_start DESC LIMIT 1"
    );
    let active_subscription = sqlx::query_as::<_, SubscriptionWithPlan>(&active_subscription_sql)
        .bind(customer_id)
        .bind(SubscriptionStatus::Active)
        .fetch_optional(pool);

    let outstanding = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(grand_total_cents), 0)::BIGINT FROM invoices \
         WHERE customer_id = $1 AND status = $2",
    )
    .bind(customer_id)
    .bind(InvoiceStatus::Open)
    .fetch_one(pool);

    let open_tickets = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM tickets WHERE customer_id = $1 AND status IN ($2, $3)",
    )
    .bind(customer_id)
    .bind(TicketStatus::OPEN[0])
    .bind(TicketStatus::OPEN[1])
    .fetch_one(pool);

    let next_installation = sqlx::query_as::<_, InstallationJob>(
        "SELECT * FROM installation_jobs \
         WHERE customer_id = $1 AND scheduled_start >= $2 AND status IN ($3, $4) \
         ORDER BY scheduled_start ASC LIMIT 1",
    )
    .bind(customer_id)
    .bind(Utc::now())
    .bind(InstallationStatus::Scheduled)
    .bind(InstallationStatus::Rescheduled)
    .fetch_optional(pool);

    let (active_subscription, outstanding_balance_cents, open_tickets, next_installation) =
        tokio::try_join!(active_subscription, outstanding, open_tickets, next_installation)?;

    Ok(AccountSummary {
        active_subscription,
        outstanding_balance_cents,
        open_tickets,
        next_installation,
    })
}

pub async fn subscriptions(
    pool: &PgPool,
    customer_id: Uuid,
) -> Result<Vec<SubscriptionWithPlan>, AppError> {
    let sql = format!(
        "{SUBSCRIPTION_WITH_PLAN} WHERE s.customer_id = $1 ORDER BY s.current_period_start DESC"
    );
    let rows = sqlx::query_as::<_, SubscriptionWithPlan>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn invoices(pool: &PgPool, customer_id: Uuid) -> Result<Vec<Invoice>, AppError> {
    let rows = sqlx::query_as::<_, Invoice>(
        "SELECT * FROM invoices WHERE customer_id = $1 ORDER BY issued_at DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn installations(
    pool: &PgPool,
    customer_id: Uuid,
) -> Result<Vec<InstallationJob>, AppError> {
    let rows = sqlx::query_as::<_, InstallationJob>(
        "SELECT * FROM installation_jobs WHERE customer_id = $1 ORDER BY scheduled_start DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
