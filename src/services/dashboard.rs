//! Admin dashboard aggregation: growth metrics, subscription trends, and
//! recent activity feeds.

use std::future::Future;

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{
    DashboardStore, InstallationActivity, InvoiceFilter, OrderActivity, StoreError,
    SubscriptionFilter, TicketActivity, TicketFilter, TimeWindow, UserFilter,
};
use crate::models::billing::{InvoiceStatus, SubscriptionStatus};
use crate::models::installation::InstallationStatus;
use crate::models::order::{OrderStatus, PaymentStatus};
use crate::models::ticket::{TicketCategory, TicketPriority, TicketStatus};
use crate::models::user::UserRole;
use crate::services::metrics;

/// Maximum rows in each recent-activity feed.
pub const RECENT_LIMIT: i64 = 10;

/// `Cache-Control` value attached to the dashboard response.
pub const CACHE_CONTROL: &str = "public, s-maxage=30, stale-while-revalidate=59";

pub const UNKNOWN_CUSTOMER: &str = "Unknown customer";
pub const UNKNOWN_PLAN: &str = "Unknown plan";
pub const UNASSIGNED_TECHNICIAN: &str = "Unassigned";

/// Current value of a metric and the same metric for the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricPair {
    pub current: i64,
    pub prior: i64,
}

impl MetricPair {
    pub fn growth(&self) -> i64 {
        metrics::growth_percent(self.current, self.prior)
    }
}

/// One calendar month of subscription movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendBucket {
    pub label: String,
    pub new_subscriptions: i64,
    pub cancelled_subscriptions: i64,
}

/// Raw aggregation result, before shaping into the response contract.
#[derive(Debug, Clone)]
pub struct DashboardAggregate {
    pub customers: MetricPair,
    pub subscriptions: MetricPair,
    pub revenue_cents: MetricPair,
    pub tickets: MetricPair,
    pub open_tickets: i64,
    pub trends: Vec<TrendBucket>,
    pub recent_orders: Vec<OrderActivity>,
    pub recent_tickets: Vec<TicketActivity>,
    pub upcoming_installations: Vec<InstallationActivity>,
    pub fetched_at: DateTime<Utc>,
}

// -- Response contract --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub stats: DashboardStats,
    pub subscription_trends: SubscriptionTrends,
    pub recent_orders: Vec<RecentOrder>,
    pub recent_tickets: Vec<RecentTicket>,
    pub upcoming_installations: Vec<UpcomingInstallation>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub new_customers: i64,
    pub customer_growth: i64,
    pub active_subscriptions: i64,
    pub subscription_growth: i64,
    /// Paid revenue this month, in currency units.
    pub monthly_revenue: f64,
    pub revenue_growth: i64,
    pub open_tickets: i64,
    pub ticket_growth: i64,
}

/// Trend series as parallel columns, ready for a chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTrends {
    pub labels: Vec<String>,
    pub new_subscriptions: Vec<i64>,
    pub cancelled_subscriptions: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub plan_name: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTicket {
    pub id: Uuid,
    pub ticket_number: String,
    pub subject: String,
    pub customer_name: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingInstallation {
    pub id: Uuid,
    pub order_number: Option<String>,
    pub customer_name: String,
    pub address: Option<String>,
    pub technician_name: String,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub status: InstallationStatus,
}

fn cents_to_units(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value.unwrap_or_else(|| placeholder.to_string())
}

impl From<OrderActivity> for RecentOrder {
    fn from(o: OrderActivity) -> Self {
        Self {
            id: o.id,
            order_number: o.order_number,
            customer_name: or_placeholder(o.customer_name, UNKNOWN_CUSTOMER),
            customer_email: o.customer_email,
            plan_name: or_placeholder(o.plan_name, UNKNOWN_PLAN),
            status: o.status,
            payment_status: o.payment_status,
            total: cents_to_units(o.grand_total_cents),
            created_at: o.created_at,
        }
    }
}

impl From<TicketActivity> for RecentTicket {
    fn from(t: TicketActivity) -> Self {
        Self {
            id: t.id,
            ticket_number: t.ticket_number,
            subject: t.subject,
            customer_name: or_placeholder(t.customer_name, UNKNOWN_CUSTOMER),
            status: t.status,
            priority: t.priority,
            category: t.category,
            created_at: t.created_at,
        }
    }
}

impl From<InstallationActivity> for UpcomingInstallation {
    fn from(j: InstallationActivity) -> Self {
        Self {
            id: j.id,
            order_number: j.order_number,
            customer_name: or_placeholder(j.customer_name, UNKNOWN_CUSTOMER),
            address: j.service_address,
            technician_name: or_placeholder(j.technician_name, UNASSIGNED_TECHNICIAN),
            scheduled_start: j.scheduled_start,
            scheduled_end: j.scheduled_end,
            status: j.status,
        }
    }
}

impl From<DashboardAggregate> for DashboardPayload {
    fn from(agg: DashboardAggregate) -> Self {
        let stats = DashboardStats {
            new_customers: agg.customers.current,
            customer_growth: agg.customers.growth(),
            active_subscriptions: agg.subscriptions.current,
            subscription_growth: agg.subscriptions.growth(),
            monthly_revenue: cents_to_units(agg.revenue_cents.current),
            revenue_growth: agg.revenue_cents.growth(),
            open_tickets: agg.open_tickets,
            ticket_growth: agg.tickets.growth(),
        };

        let mut trends = SubscriptionTrends {
            labels: Vec::with_capacity(agg.trends.len()),
            new_subscriptions: Vec::with_capacity(agg.trends.len()),
            cancelled_subscriptions: Vec::with_capacity(agg.trends.len()),
        };
        for bucket in agg.trends {
            trends.labels.push(bucket.label);
            trends.new_subscriptions.push(bucket.new_subscriptions);
            trends.cancelled_subscriptions.push(bucket.cancelled_subscriptions);
        }

        Self {
            stats,
            subscription_trends: trends,
            recent_orders: agg.recent_orders.into_iter().map(Into::into).collect(),
            recent_tickets: agg.recent_tickets.into_iter().map(Into::into).collect(),
            upcoming_installations: agg
                .upcoming_installations
                .into_iter()
                .map(Into::into)
                .collect(),
            fetched_at: agg.fetched_at,
        }
    }
}

// -- Aggregation --

/// Build the dashboard payload as of `now`.
pub async fn get_dashboard(
    store: &dyn DashboardStore,
    now: DateTime<Utc>,
) -> Result<DashboardPayload, StoreError> {
    aggregate(store, now).await.map(DashboardPayload::from)
}

/// Run every dashboard read concurrently; the first failure aborts the rest.
pub async fn aggregate(
    store: &dyn DashboardStore,
    now: DateTime<Utc>,
) -> Result<DashboardAggregate, StoreError> {
    let current = metrics::current_period(now);
    let prior = metrics::prior_period(now);

    let (
        customers,
        subscriptions,
        revenue_cents,
        tickets,
        open_tickets,
        trends,
        recent_orders,
        recent_tickets,
        upcoming_installations,
    ) = tokio::try_join!(
        metric_pair(new_customers(store, current), new_customers(store, prior)),
        metric_pair(
            opened_subscriptions(store, current),
            opened_subscriptions(store, prior),
        ),
        metric_pair(paid_revenue(store, current), paid_revenue(store, prior)),
        metric_pair(created_tickets(store, current), created_tickets(store, prior)),
        count_open_tickets(store),
        subscription_trends(store, now),
        store.recent_orders(RECENT_LIMIT),
        store.recent_tickets(RECENT_LIMIT),
        store.upcoming_installations(now, RECENT_LIMIT),
    )?;

    tracing::debug!(
        new_customers = customers.current,
        open_tickets,
        recent_orders = recent_orders.len(),
        "Dashboard aggregated"
    );

    Ok(DashboardAggregate {
        customers,
        subscriptions,
        revenue_cents,
        tickets,
        open_tickets,
        trends,
        recent_orders,
        recent_tickets,
        upcoming_installations,
        fetched_at: now,
    })
}

/// Evaluate one metric over the current and prior windows in parallel.
async fn metric_pair(
    current: impl Future<Output = Result<i64, StoreError>>,
    prior: impl Future<Output = Result<i64, StoreError>>,
) -> Result<MetricPair, StoreError> {
    let (current, prior) = tokio::try_join!(current, prior)?;
    Ok(MetricPair { current, prior })
}

/// Users with the customer role created in the window.
async fn new_customers(store: &dyn DashboardStore, window: TimeWindow) -> Result<i64, StoreError> {
    store
        .count_users(&UserFilter {
            role: Some(UserRole::Customer),
            created_in: Some(window),
        })
        .await
}

/// Active subscriptions whose current period opened in the window.
async fn opened_subscriptions(
    store: &dyn DashboardStore,
    window: TimeWindow,
) -> Result<i64, StoreError> {
    store
        .count_subscriptions(&SubscriptionFilter {
            status: Some(SubscriptionStatus::Active),
            period_start_in: Some(window),
            cancelled_in: None,
        })
        .await
}

/// Paid invoice totals issued in the window, in cents.
async fn paid_revenue(store: &dyn DashboardStore, window: TimeWindow) -> Result<i64, StoreError> {
    store
        .sum_invoice_totals(&InvoiceFilter {
            status: Some(InvoiceStatus::Paid),
            issued_in: Some(window),
        })
        .await
}

/// Tickets created in the window, any status.
async fn created_tickets(store: &dyn DashboardStore, window: TimeWindow) -> Result<i64, StoreError> {
    store
        .count_tickets(&TicketFilter {
            statuses: Vec::new(),
            created_in: Some(window),
        })
        .await
}

async fn count_open_tickets(store: &dyn DashboardStore) -> Result<i64, StoreError> {
    store
        .count_tickets(&TicketFilter {
            statuses: TicketStatus::OPEN.to_vec(),
            created_in: None,
        })
        .await
}

/// Six calendar months of new vs. cancelled subscriptions, oldest first.
async fn subscription_trends(
    store: &dyn DashboardStore,
    now: DateTime<Utc>,
) -> Result<Vec<TrendBucket>, StoreError> {
    let buckets = metrics::trend_windows(now)
        .into_iter()
        .map(|(label, window)| trend_bucket(store, label, window));
    try_join_all(buckets).await
}

async fn trend_bucket(
    store: &dyn DashboardStore,
    label: String,
    window: TimeWindow,
) -> Result<TrendBucket, StoreError> {
    let started = SubscriptionFilter {
        period_start_in: Some(window),
        ..Default::default()
    };
    let cancelled = SubscriptionFilter {
        cancelled_in: Some(window),
        ..Default::default()
    };
    let (new_subscriptions, cancelled_subscriptions) = tokio::try_join!(
        store.count_subscriptions(&started),
        store.count_subscriptions(&cancelled),
    )?;
    Ok(TrendBucket {
        label,
        new_subscriptions,
        cancelled_subscriptions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::db::MemoryStore;
    use crate::models::billing::{BillingCycle, Invoice, Subscription};
    use crate::models::installation::InstallationJob;
    use crate::models::order::Order;
    use crate::models::plan::Plan;
    use crate::models::ticket::Ticket;
    use crate::models::user::User;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap()
    }

    fn user(name: &str, role: UserRole, created_at: DateTime<Utc>) -> User {
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
            created_at,
            updated_at: created_at,
        }
    }

    fn plan(name: &str) -> Plan {
        Plan {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: None,
            download_mbps: 500,
            upload_mbps: 500,
            monthly_price_cents: 6000,
            installation_fee_cents: 0,
            data_cap_gb: None,
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn subscription(
        status: SubscriptionStatus,
        start: DateTime<Utc>,
        cancelled_at: Option<DateTime<Utc>>,
    ) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            customer_id: None,
            plan_id: None,
            order_id: None,
            status,
            billing_cycle: BillingCycle::Monthly,
            current_period_start: start,
            current_period_end: start + Duration::days(30),
            cancelled_at,
            created_at: start,
        }
    }

    fn invoice(status: InvoiceStatus, cents: i64, issued_at: DateTime<Utc>) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            invoice_number: format!("INV-{}", Uuid::new_v4().simple()),
            customer_id: None,
            subscription_id: None,
            status,
            grand_total_cents: cents,
            issued_at,
            paid_at: None,
        }
    }

    fn ticket(status: TicketStatus, created_at: DateTime<Utc>) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            ticket_number: format!("TKT-{}", created_at.timestamp()),
            customer_id: None,
            subject: "Outage".to_string(),
            description: "No connectivity".to_string(),
            status,
            priority: TicketPriority::High,
            category: TicketCategory::Technical,
            created_at,
            updated_at: created_at,
        }
    }

    fn order(customer_id: Option<Uuid>, plan_id: Option<Uuid>, created_at: DateTime<Utc>) -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: format!("ORD-{}", created_at.timestamp()),
            customer_id,
            plan_id,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            subtotal_cents: 6000,
            tax_cents: 0,
            discount_cents: 0,
            grand_total_cents: 6000,
            service_address: "12 Fiber Way".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    fn job(start: DateTime<Utc>, technician_id: Option<Uuid>) -> InstallationJob {
        InstallationJob {
            id: Uuid::new_v4(),
            order_id: None,
            customer_id: None,
            technician_id,
            scheduled_start: start,
            scheduled_end: start + Duration::hours(2),
            status: InstallationStatus::Scheduled,
            notes: None,
            created_at: start - Duration::days(3),
        }
    }

    fn this_month(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, day, 9, 0, 0).unwrap()
    }

    fn last_month(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, day, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn revenue_growth_from_paid_invoices_only() {
        let store = MemoryStore::new();
        store.insert_invoice(invoice(InvoiceStatus::Paid, 60_000, last_month(3))).await;
        store.insert_invoice(invoice(InvoiceStatus::Paid, 40_000, last_month(28))).await;
        store.insert_invoice(invoice(InvoiceStatus::Paid, 120_000, this_month(2))).await;
        store.insert_invoice(invoice(InvoiceStatus::Open, 999_999, this_month(3))).await;
        store.insert_invoice(invoice(InvoiceStatus::Void, 50_000, last_month(5))).await;

        let payload = get_dashboard(&store, now()).await.unwrap();
        assert_eq!(payload.stats.monthly_revenue, 1200.0);
        assert_eq!(payload.stats.revenue_growth, 20);
    }

    #[tokio::test]
    async fn subscription_growth_from_empty_prior_month() {
        let store = MemoryStore::new();
        for day in [1, 5, 19] {
            store
                .insert_subscription(subscription(SubscriptionStatus::Active, this_month(day), None))
                .await;
        }
        // Trial and future-dated subscriptions do not count as opened this month.
        store
            .insert_subscription(subscription(SubscriptionStatus::Trial, this_month(6), None))
            .await;
        store
            .insert_subscription(subscription(SubscriptionStatus::Active, this_month(25), None))
            .await;

        let payload = get_dashboard(&store, now()).await.unwrap();
        assert_eq!(payload.stats.active_subscriptions, 3);
        assert_eq!(payload.stats.subscription_growth, 100);
    }

    #[tokio::test]
    async fn customer_and_ticket_metrics() {
        let store = MemoryStore::new();
        store.insert_user(user("A", UserRole::Customer, last_month(2))).await;
        store.insert_user(user("B", UserRole::Customer, last_month(9))).await;
        store.insert_user(user("C", UserRole::Customer, this_month(4))).await;
        store.insert_user(user("Ops", UserRole::Ops, this_month(4))).await;

        store.insert_ticket(ticket(TicketStatus::Closed, last_month(10))).await;
        store.insert_ticket(ticket(TicketStatus::Pending, this_month(1))).await;
        store.insert_ticket(ticket(TicketStatus::InProgress, this_month(2))).await;
        store.insert_ticket(ticket(TicketStatus::OnHold, this_month(3))).await;

        let stats = get_dashboard(&store, now()).await.unwrap().stats;
        assert_eq!(stats.new_customers, 1);
        assert_eq!(stats.customer_growth, -50);
        assert_eq!(stats.open_tickets, 2);
        assert_eq!(stats.ticket_growth, 200);
    }

    #[tokio::test]
    async fn empty_store_yields_zeroed_payload() {
        let store = MemoryStore::new();
        let payload = get_dashboard(&store, now()).await.unwrap();
        assert_eq!(
            payload.stats,
            DashboardStats {
                new_customers: 0,
                customer_growth: 0,
                active_subscriptions: 0,
                subscription_growth: 0,
                monthly_revenue: 0.0,
                revenue_growth: 0,
                open_tickets: 0,
                ticket_growth: 0,
            }
        );
        assert_eq!(payload.subscription_trends.labels.len(), 6);
        assert_eq!(payload.subscription_trends.new_subscriptions, vec![0; 6]);
        assert_eq!(payload.subscription_trends.cancelled_subscriptions, vec![0; 6]);
        assert!(payload.recent_orders.is_empty());
        assert_eq!(payload.fetched_at, now());
    }

    #[tokio::test]
    async fn trends_bucket_by_calendar_month() {
        let store = MemoryStore::new();
        let dec = Utc.with_ymd_and_hms(2025, 12, 15, 0, 0, 0).unwrap();
        let nov = Utc.with_ymd_and_hms(2025, 11, 30, 23, 59, 59).unwrap();
        store
            .insert_subscription(subscription(SubscriptionStatus::Cancelled, dec, Some(last_month(1))))
            .await;
        store
            .insert_subscription(subscription(SubscriptionStatus::Active, this_month(10), None))
            .await;
        // Outside the six-month range.
        store
            .insert_subscription(subscription(SubscriptionStatus::Active, nov, None))
            .await;

        let trends = get_dashboard(&store, now()).await.unwrap().subscription_trends;
        assert_eq!(
            trends.labels,
            ["Dec 2025", "Jan 2026", "Feb 2026", "Mar 2026", "Apr 2026", "May 2026"]
        );
        assert_eq!(trends.new_subscriptions, vec![1, 0, 0, 0, 0, 1]);
        assert_eq!(trends.cancelled_subscriptions, vec![0, 0, 0, 0, 1, 0]);
    }

    #[tokio::test]
    async fn recent_order_with_deleted_plan_gets_placeholder() {
        let store = MemoryStore::new();
        let customer = user("Dana", UserRole::Customer, last_month(1));
        let fiber = plan("Fiber 1000");
        let (customer_id, plan_id) = (customer.id, fiber.id);
        store.insert_user(customer).await;
        store.insert_plan(fiber).await;
        store.insert_order(order(Some(customer_id), Some(plan_id), this_month(3))).await;
        store.remove_plan(plan_id).await;

        let payload = get_dashboard(&store, now()).await.unwrap();
        assert_eq!(payload.recent_orders.len(), 1);
        assert_eq!(payload.recent_orders[0].plan_name, UNKNOWN_PLAN);
        assert_eq!(payload.recent_orders[0].customer_name, "Dana");
        assert_eq!(payload.recent_orders[0].total, 60.0);
    }

    #[tokio::test]
    async fn recent_feeds_are_capped_and_ordered() {
        let store = MemoryStore::new();
        for hour in 0..14 {
            let at = now() - Duration::hours(hour);
            store.insert_order(order(None, None, at)).await;
            store.insert_ticket(ticket(TicketStatus::Pending, at)).await;
        }
        let payload = get_dashboard(&store, now()).await.unwrap();
        assert_eq!(payload.recent_orders.len(), 10);
        assert_eq!(payload.recent_tickets.len(), 10);
        assert!(payload
            .recent_orders
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
        assert!(payload
            .recent_tickets
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(payload.recent_orders[0].customer_name, UNKNOWN_CUSTOMER);
    }

    #[tokio::test]
    async fn upcoming_installations_exclude_past_jobs() {
        let store = MemoryStore::new();
        let tech = user("Tess", UserRole::Tech, last_month(1));
        let tech_id = tech.id;
        store.insert_user(tech).await;

        store.insert_installation(job(now() - Duration::hours(1), Some(tech_id))).await;
        for day in (1..=12).rev() {
            store.insert_installation(job(now() + Duration::days(day), None)).await;
        }
        store.insert_installation(job(now(), Some(tech_id))).await;

        let upcoming = get_dashboard(&store, now()).await.unwrap().upcoming_installations;
        assert_eq!(upcoming.len(), 10);
        assert!(upcoming.iter().all(|j| j.scheduled_start >= now()));
        assert!(upcoming
            .windows(2)
            .all(|w| w[0].scheduled_start <= w[1].scheduled_start));
        assert_eq!(upcoming[0].scheduled_start, now());
        assert_eq!(upcoming[0].technician_name, "Tess");
        assert_eq!(upcoming[1].technician_name, UNASSIGNED_TECHNICIAN);
    }

    #[tokio::test]
    async fn any_failed_read_fails_the_whole_aggregation() {
        let store = MemoryStore::failing("connection refused");
        let err = get_dashboard(&store, now()).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn payload_serializes_camel_case() {
        let agg = DashboardAggregate {
            customers: MetricPair { current: 2, prior: 1 },
            subscriptions: MetricPair { current: 0, prior: 0 },
            revenue_cents: MetricPair { current: 12_345, prior: 0 },
            tickets: MetricPair { current: 0, prior: 3 },
            open_tickets: 4,
            trends: vec![TrendBucket {
                label: "May 2026".to_string(),
                new_subscriptions: 3,
                cancelled_subscriptions: 1,
            }],
            recent_orders: vec![],
            recent_tickets: vec![],
            upcoming_installations: vec![],
            fetched_at: now(),
        };
        let json = serde_json::to_value(DashboardPayload::from(agg)).unwrap();
        assert_eq!(json["stats"]["newCustomers"], 2);
        assert_eq!(json["stats"]["customerGrowth"], 100);
        assert_eq!(json["stats"]["monthlyRevenue"], 123.45);
        assert_eq!(json["stats"]["revenueGrowth"], 100);
        assert_eq!(json["stats"]["ticketGrowth"], -100);
        assert_eq!(json["subscriptionTrends"]["labels"][0], "May 2026");
        assert_eq!(json["subscriptionTrends"]["cancelledSubscriptions"][0], 1);
        assert!(json["recentOrders"].as_array().unwrap().is_empty());
        assert!(json["upcomingInstallations"].is_array());
        assert!(json["fetchedAt"].is_string());
    }
}
