//! Typed per-collection filters for dashboard reads.
//!
//! Each backend interprets the same filter values: `PgStore` turns them into
//! SQL conditions, `MemoryStore` evaluates them with the `matches` methods.

use chrono::{DateTime, Utc};

use crate::models::billing::{Invoice, InvoiceStatus, Subscription, SubscriptionStatus};
use crate::models::ticket::{Ticket, TicketStatus};
use crate::models::user::{User, UserRole};

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

fn within(window: Option<&TimeWindow>, ts: DateTime<Utc>) -> bool {
    window.map_or(true, |w| w.contains(ts))
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub created_in: Option<TimeWindow>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |r| user.role == r) && within(self.created_in.as_ref(), user.created_at)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionFilter {
    pub status: Option<SubscriptionStatus>,
    pub period_start_in: Option<TimeWindow>,
    pub cancelled_in: Option<TimeWindow>,
}

impl SubscriptionFilter {
    pub fn matches(&self, sub: &Subscription) -> bool {
        if let Some(status) = self.status {
            if sub.status != status {
                return false;
            }
        }
        if !within(self.period_start_in.as_ref(), sub.current_period_start) {
            return false;
        }
        match (&self.cancelled_in, sub.cancelled_at) {
            (None, _) => true,
            (Some(window), Some(at)) => window.contains(at),
            (Some(_), None) => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub issued_in: Option<TimeWindow>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.status.map_or(true, |s| invoice.status == s)
            && within(self.issued_in.as_ref(), invoice.issued_at)
    }
}

/// An empty `statuses` list means any status.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub statuses: Vec<TicketStatus>,
    pub created_in: Option<TimeWindow>,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&ticket.status))
            && within(self.created_in.as_ref(), ticket.created_at)
    }
}
