//! In-memory `DashboardStore` for tests and local demos.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::filters::{InvoiceFilter, SubscriptionFilter, TicketFilter, UserFilter};
use super::store::{DashboardStore, InstallationActivity, OrderActivity, TicketActivity};
use super::StoreError;
use crate::models::billing::{Invoice, Subscription};
use crate::models::installation::InstallationJob;
use crate::models::order::Order;
use crate::models::plan::Plan;
use crate::models::ticket::Ticket;
use crate::models::user::User;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    plans: Vec<Plan>,
    orders: Vec<Order>,
    subscriptions: Vec<Subscription>,
    invoices: Vec<Invoice>,
    tickets: Vec<Ticket>,
    installations: Vec<InstallationJob>,
}

impl Collections {
    fn user(&self, id: Option<Uuid>) -> Option<&User> {
        id.and_then(|id| self.users.iter().find(|u| u.id == id))
    }

    fn plan(&self, id: Option<Uuid>) -> Option<&Plan> {
        id.and_then(|id| self.plans.iter().find(|p| p.id == id))
    }

    fn order(&self, id: Option<Uuid>) -> Option<&Order> {
        id.and_then(|id| self.orders.iter().find(|o| o.id == id))
    }
}

/// Vector-backed store; cloning shares the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Collections>>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            data: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub async fn insert_user(&self, user: User) {
        self.data.write().await.users.push(user);
    }

    pub async fn insert_plan(&self, plan: Plan) {
        self.data.write().await.plans.push(plan);
    }

    pub async fn insert_order(&self, order: Order) {
        self.data.write().await.orders.push(order);
    }

    pub async fn insert_subscription(&self, subscription: Subscription) {
        self.data.write().await.subscriptions.push(subscription);
    }

    pub async fn insert_invoice(&self, invoice: Invoice) {
        self.data.write().await.invoices.push(invoice);
    }

    pub async fn insert_ticket(&self, ticket: Ticket) {
        self.data.write().await.tickets.push(ticket);
    }

    pub async fn insert_installation(&self, job: InstallationJob) {
        self.data.write().await.installations.push(job);
    }

    /// Remove a plan, leaving any orders that reference it dangling.
    pub async fn remove_plan(&self, id: Uuid) {
        self.data.write().await.plans.retain(|p| p.id != id);
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Query(message.clone())),
            None => Ok(()),
        }
    }
}

fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn count_users(&self, filter: &UserFilter) -> Result<i64, StoreError> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.users.iter().filter(|u| filter.matches(u)).count() as i64)
    }

    async fn count_subscriptions(&self, filter: &SubscriptionFilter) -> Result<i64, StoreError> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.subscriptions.iter().filter(|s| filter.matches(s)).count() as i64)
    }

    async fn sum_invoice_totals(&self, filter: &InvoiceFilter) -> Result<i64, StoreError> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data
            .invoices
            .iter()
            .filter(|i| filter.matches(i))
            .map(|i| i.grand_total_cents)
            .sum())
    }

    async fn count_tickets(&self, filter: &TicketFilter) -> Result<i64, StoreError> {
        self.check()?;
        let data = self.data.read().await;
        Ok(data.tickets.iter().filter(|t| filter.matches(t)).count() as i64)
    }

    async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderActivity>, StoreError> {
        self.check()?;
        let data = self.data.read().await;
        let mut orders: Vec<&Order> = data.orders.iter().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders
            .into_iter()
            .take(clamp_limit(limit))
            .map(|o| {
                let customer = data.user(o.customer_id);
                OrderActivity {
                    id: o.id,
                    order_number: o.order_number.clone(),
                    customer_name: customer.map(|u| u.full_name.clone()),
                    customer_email: customer.map(|u| u.email.clone()),
                    plan_name: data.plan(o.plan_id).map(|p| p.name.clone()),
                    status: o.status,
                    payment_status: o.payment_status,
                    grand_total_cents: o.grand_total_cents,
                    created_at: o.created_at,
                }
            })
            .collect())
    }

    async fn recent_tickets(&self, limit: i64) -> Result<Vec<TicketActivity>, StoreError> {
        self.check()?;
        let data = self.data.read().await;
        let mut tickets: Vec<&Ticket> = data.tickets.iter().collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets
            .into_iter()
            .take(clamp_limit(limit))
            .map(|t| TicketActivity {
                id: t.id,
                ticket_number: t.ticket_number.clone(),
                subject: t.subject.clone(),
                customer_name: data.user(t.customer_id).map(|u| u.full_name.clone()),
                status: t.status,
                priority: t.priority,
                category: t.category,
                created_at: t.created_at,
            })
            .collect())
    }

    async fn upcoming_installations(
        &self,
        from: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<InstallationActivity>, StoreError> {
        self.check()?;
        let data = self.data.read().await;
        let mut jobs: Vec<&InstallationJob> = data
            .installations
            .iter()
            .filter(|j| j.scheduled_start >= from)
            .collect();
        jobs.sort_by(|a, b| a.scheduled_start.cmp(&b.scheduled_start));
        Ok(jobs
            .into_iter()
            .take(clamp_limit(limit))
            .map(|j| {
                let order = data.order(j.order_id);
                InstallationActivity {
                    id: j.id,
                    order_number: order.map(|o| o.order_number.clone()),
                    customer_name: data.user(j.customer_id).map(|u| u.full_name.clone()),
                    service_address: order.map(|o| o.service_address.clone()),
                    technician_name: data.user(j.technician_id).map(|u| u.full_name.clone()),
                    scheduled_start: j.scheduled_start,
                    scheduled_end: j.scheduled_end,
                    status: j.status,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::order::{OrderStatus, PaymentStatus};
    use crate::models::ticket::{TicketCategory, TicketPriority, TicketStatus};
    use crate::models::user::UserRole;

    fn user(name: &str, role: UserRole) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: format!("{}@example.net", name.to_lowercase()),
            password_hash: "hash".to_string(),
            full_name: name.to_string(),
            phone: None,
            role,
            is_active: true,
            failed_login_attempts: 0,
            locked_until: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn order(customer_id: Option<Uuid>, created_at: DateTime<Utc>) -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: format!("ORD-{}", created_at.timestamp()),
            customer_id,
            plan_id: Some(Uuid::new_v4()),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            subtotal_cents: 5000,
            tax_cents: 0,
            discount_cents: 0,
            grand_total_cents: 5000,
            service_address: "1 Main St".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn recent_orders_newest_first_with_missing_joins() {
        let store = MemoryStore::new();
        let alice = user("Alice", UserRole::Customer);
        let alice_id = alice.id;
        store.insert_user(alice).await;

        let now = Utc::now();
        store.insert_order(order(Some(alice_id), now - Duration::days(2))).await;
        store.insert_order(order(None, now)).await;

        let rows = store.recent_orders(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].created_at > rows[1].created_at);
        assert!(rows[0].customer_name.is_none());
        assert_eq!(rows[1].customer_name.as_deref(), Some("Alice"));
        // Plan ids point nowhere in this store.
        assert!(rows.iter().all(|r| r.plan_name.is_none()));
    }

    #[tokio::test]
    async fn recent_tickets_respects_limit() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for i in 0..15 {
            store
                .insert_ticket(Ticket {
                    id: Uuid::new_v4(),
                    ticket_number: format!("TKT-{i}"),
                    customer_id: None,
                    subject: "Slow speeds".to_string(),
                    description: "Evenings only".to_string(),
                    status: TicketStatus::Pending,
                    priority: TicketPriority::Medium,
                    category: TicketCategory::Technical,
                    created_at: now - Duration::hours(i),
                    updated_at: now,
                })
                .await;
        }
        let rows = store.recent_tickets(10).await.unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].ticket_number, "TKT-0");
    }

    #[test]
    fn failing_store_rejects_reads() {
        let store = MemoryStore::failing("boom");
        let result = tokio_test::block_on(store.count_users(&UserFilter::default()));
        assert!(matches!(result, Err(StoreError::Query(msg)) if msg == "boom"));
    }
}
