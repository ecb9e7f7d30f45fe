//! Service orders placed against a plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Scheduled,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order fulfilment flow allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Scheduled)
                | (Scheduled, Completed)
                | (Pending | Confirmed | Scheduled, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub grand_total_cents: i64,
    pub service_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order row joined with customer and plan display fields for back-office lists.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderSummary {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub plan_name: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub grand_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceOrder {
    pub plan_id: Uuid,
    #[validate(length(min = 5, max = 300))]
    pub service_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Monetary breakdown of an order, all in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub grand_total_cents: i64,
}

impl OrderTotals {
    /// Price a new order: first month plus installation fee, taxed at
    /// `tax_rate_bps` basis points, rounded half-up to the cent.
    pub fn compute(monthly_price_cents: i64, installation_fee_cents: i64, tax_rate_bps: i64) -> Self {
        let subtotal_cents = monthly_price_cents + installation_fee_cents;
        let tax_cents = (subtotal_cents * tax_rate_bps + 5_000) / 10_000;
        let discount_cents = 0;
        Self {
            subtotal_cents,
            tax_cents,
            discount_cents,
            grand_total_cents: subtotal_cents + tax_cents - discount_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fulfilment_flow_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Scheduled));
        assert!(Scheduled.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn totals_without_tax() {
        let totals = OrderTotals::compute(5999, 4900, 0);
        assert_eq!(totals.subtotal_cents, 10899);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.grand_total_cents, 10899);
    }

    #[test]
    fn totals_round_tax_half_up() {
        // 8.25% of 10.10 = 0.83325 -> 83 cents
        let totals = OrderTotals::compute(1010, 0, 825);
        assert_eq!(totals.tax_cents, 83);
        // 5% of 0.10 = 0.005 -> rounds up to 1 cent
        let totals = OrderTotals::compute(10, 0, 500);
        assert_eq!(totals.tax_cents, 1);
        assert_eq!(totals.grand_total_cents, 11);
    }

    #[test]
    fn status_wire_format() {
        let json = serde_json::to_string(&PaymentStatus::Refunded).unwrap();
        assert_eq!(json, "\"refunded\"");
    }
}
