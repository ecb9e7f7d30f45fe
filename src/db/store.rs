//! Read-only store interface consumed by the admin dashboard aggregator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::filters::{InvoiceFilter, SubscriptionFilter, TicketFilter, UserFilter};
use super::StoreError;
use crate::models::installation::InstallationStatus;
use crate::models::order::{OrderStatus, PaymentStatus};
use crate::models::ticket::{TicketCategory, TicketPriority, TicketStatus};

/// Recent order with the display fields of its customer and plan.
///
/// Joined fields are `None` when the referenced row no longer exists.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderActivity {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub plan_name: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub grand_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// Recent ticket with its customer's display name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TicketActivity {
    pub id: Uuid,
    pub ticket_number: String,
    pub subject: String,
    pub customer_name: Option<String>,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub created_at: DateTime<Utc>,
}

/// Upcoming installation with order, customer and technician display fields.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InstallationActivity {
    pub id: Uuid,
    pub order_number: Option<String>,
    pub customer_name: Option<String>,
    pub service_address: Option<String>,
    pub technician_name: Option<String>,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub status: InstallationStatus,
}

/// Read access to the portal collections needed by the admin dashboard.
///
/// Implementations must not mutate anything; every method is safe to retry.
#[async_trait]
pub trait DashboardStore: Send + Sync + std::fmt::Debug {
    async fn count_users(&self, filter: &UserFilter) -> Result<i64, StoreError>;

    async fn count_subscriptions(&self, filter: &SubscriptionFilter) -> Result<i64, StoreError>;

    /// Sum of `grand_total_cents` over matching invoices.
    async fn sum_invoice_totals(&self, filter: &InvoiceFilter) -> Result<i64, StoreError>;

    async fn count_tickets(&self, filter: &TicketFilter) -> Result<i64, StoreError>;

    /// Most recently created orders, newest first.
    async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderActivity>, StoreError>;

    /// Most recently created tickets, newest first.
    async fn recent_tickets(&self, limit: i64) -> Result<Vec<TicketActivity>, StoreError>;

    /// Jobs with `scheduled_start >= from`, soonest first.
    async fn upcoming_installations(
        &self,
        from: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<InstallationActivity>, StoreError>;
}
