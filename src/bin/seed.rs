//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env). Safe to re-run: existing rows are
//! detected by email or slug and left alone.

use chrono::{Duration, Utc};
use isp_portal::models::billing::{BillingCycle, InvoiceStatus, SubscriptionStatus};
use isp_portal::models::installation::InstallationStatus;
use isp_portal::models::order::{OrderStatus, OrderTotals, PaymentStatus};
use isp_portal::models::ticket::{TicketCategory, TicketPriority, TicketStatus};
use isp_portal::models::user::UserRole;
use isp_portal::services::{auth, reference_number};
use sqlx::PgPool;
use uuid::Uuid;

const SEED_PASSWORD: &str = "Test123!";

struct SeedPlan {
    name: &'static str,
    slug: &'static str,
    download_mbps: i32,
    upload_mbps: i32,
    monthly_price_cents: i64,
    installation_fee_cents: i64,
}

const PLANS: &[SeedPlan] = &[
    SeedPlan {
        name: "Starter 50",
        slug: "starter-50",
        download_mbps: 50,
        upload_mbps: 10,
        monthly_price_cents: 3999,
        installation_fee_cents: 4900,
    },
    SeedPlan {
        name: "Fiber 300",
        slug: "fiber-300",
        download_mbps: 300,
        upload_mbps: 100,
        monthly_price_cents: 5999,
        installation_fee_cents: 0,
    },
    SeedPlan {
        name: "Fiber Gigabit",
        slug: "fiber-gigabit",
        download_mbps: 1000,
        upload_mbps: 500,
        monthly_price_cents: 8999,
        installation_fee_cents: 0,
    },
];

const STAFF: &[(&str, &str, UserRole)] = &[
    ("admin@isp.local", "Portal Administrator", UserRole::Admin),
    ("ops@isp.local", "Olive Operations", UserRole::Ops),
    ("support@isp.local", "Sam Support", UserRole::Support),
    ("tech@isp.local", "Theo Technician", UserRole::Tech),
];

const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("ada@example.net", "Ada Lovelace", "12 Analytical Way"),
    ("alan@example.net", "Alan Turing", "7 Bletchley Rd"),
    ("grace@example.net", "Grace Hopper", "99 Compiler Ave"),
    ("linus@example.net", "Linus Kernel", "1 Penguin St"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = isp_portal::db::create_pool(&db_url, 5).await?;
    isp_portal::db::run_migrations(&pool).await?;

    println!("=== ISP Portal Seed Script ===");

    for (email, name, role) in STAFF {
        upsert_user(&pool, email, name, *role).await?;
    }
    let technician_id = upsert_user(&pool, "tech@isp.local", "Theo Technician", UserRole::Tech).await?;

    let mut plan_ids = Vec::with_capacity(PLANS.len());
    for plan in PLANS {
        plan_ids.push(upsert_plan(&pool, plan).await?);
    }

    for (i, (email, name, address)) in CUSTOMERS.iter().enumerate() {
        let customer_id = upsert_user(&pool, email, name, UserRole::Customer).await?;
        let plan = &PLANS[i % PLANS.len()];
        let plan_id = plan_ids[i % plan_ids.len()];
        seed_customer_activity(&pool, customer_id, plan_id, plan, address, technician_id, i as i64)
            .await?;
    }

    println!("\n=== Seed complete! ===");
    println!("Staff logins: admin@isp.local / ops@isp.local / support@isp.local / tech@isp.local");
    println!("Password for every seeded account: {SEED_PASSWORD}");

    Ok(())
}

async fn upsert_user(
    pool: &PgPool,
    email: &str,
    full_name: &str,
    role: UserRole,
) -> anyhow::Result<Uuid> {
    if let Some(id) = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let hash = auth::hash_password(SEED_PASSWORD)?;
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password_hash, full_name, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(email)
    .bind(&hash)
    .bind(full_name)
    .bind(role)
    .fetch_one(pool)
    .await?;
    println!("[done] {} {email}", role.as_str());
    Ok(id)
}

async fn upsert_plan(pool: &PgPool, plan: &SeedPlan) -> anyhow::Result<Uuid> {
    if let Some(id) = sqlx::query_scalar::<_, Uuid>("SELECT id FROM plans WHERE slug = $1")
        .bind(plan.slug)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO plans (name, slug, download_mbps, upload_mbps, monthly_price_cents, installation_fee_cents)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(plan.name)
    .bind(plan.slug)
    .bind(plan.download_mbps)
    .bind(plan.upload_mbps)
    .bind(plan.monthly_price_cents)
    .bind(plan.installation_fee_cents)
    .fetch_one(pool)
    .await?;
    println!("[done] plan {}", plan.slug);
    Ok(id)
}

/// One order, subscription, invoice, ticket, and installation job per customer,
/// spread over recent weeks so the dashboard has data in both periods.
async fn seed_customer_activity(
    pool: &PgPool,
    customer_id: Uuid,
    plan_id: Uuid,
    plan: &SeedPlan,
    address: &str,
    technician_id: Uuid,
    offset: i64,
) -> anyhow::Result<()> {
    let has_orders: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE customer_id = $1)")
            .bind(customer_id)
            .fetch_one(pool)
            .await?;
    if has_orders {
        return Ok(());
    }

    let now = Utc::now();
    let placed_at = now - Duration::days(7 * offset + 2);
    let totals = OrderTotals::compute(plan.monthly_price_cents, plan.installation_fee_cents, 0);

    let order_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO orders (
            order_number, customer_id, plan_id, status, payment_status,
            subtotal_cents, tax_cents, discount_cents, grand_total_cents, service_address, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id
        "#,
    )
    .bind(reference_number("ORD"))
    .bind(customer_id)
    .bind(plan_id)
    .bind(OrderStatus::Scheduled)
    .bind(PaymentStatus::Paid)
    .bind(totals.subtotal_cents)
    .bind(totals.tax_cents)
    .bind(totals.discount_cents)
    .bind(totals.grand_total_cents)
    .bind(address)
    .bind(placed_at)
    .fetch_one(pool)
    .await?;

    let subscription_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO subscriptions (
            customer_id, plan_id, order_id, status, billing_cycle,
            current_period_start, current_period_end
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(customer_id)
    .bind(plan_id)
    .bind(order_id)
    .bind(SubscriptionStatus::Active)
    .bind(BillingCycle::Monthly)
    .bind(placed_at)
    .bind(placed_at + Duration::days(30))
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO invoices (invoice_number, customer_id, subscription_id, status, grand_total_cents, issued_at, paid_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        "#,
    )
    .bind(reference_number("INV"))
    .bind(customer_id)
    .bind(subscription_id)
    .bind(InvoiceStatus::Paid)
    .bind(totals.grand_total_cents)
    .bind(placed_at)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO tickets (ticket_number, customer_id, subject, description, status, priority, category, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(reference_number("TKT"))
    .bind(customer_id)
    .bind("Router light blinking amber")
    .bind("The connection drops every evening around 8pm.")
    .bind(if offset % 2 == 0 {
        TicketStatus::Pending
    } else {
        TicketStatus::Resolved
    })
    .bind(TicketPriority::Medium)
    .bind(TicketCategory::Technical)
    .bind(placed_at + Duration::hours(6))
    .execute(pool)
    .await?;

    let start = now + Duration::days(offset + 1);
    sqlx::query(
        r#"
        INSERT INTO installation_jobs (order_id, customer_id, technician_id, scheduled_start, scheduled_end, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(order_id)
    .bind(customer_id)
    .bind((offset % 2 == 0).then_some(technician_id))
    .bind(start)
    .bind(start + Duration::hours(3))
    .bind(InstallationStatus::Scheduled)
    .execute(pool)
    .await?;

    println!("[done] activity for customer {customer_id}");
    Ok(())
}
