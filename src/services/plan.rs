//! Plan catalogue: public browsing and operator maintenance.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::plan::{CreatePlan, Plan, UpdatePlan};

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Plan slug already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// Active plans, cheapest first.
pub async fn list_active(pool: &PgPool) -> Result<Vec<Plan>, AppError> {
    let plans = sqlx::query_as::<_, Plan>(
        "SELECT * FROM plans WHERE is_active = true ORDER BY monthly_price_cents ASC, name ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(plans)
}

/// Every plan, including retired ones.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Plan>, AppError> {
    let plans = sqlx::query_as::<_, Plan>("SELECT * FROM plans ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(plans)
}

pub async fn find_active_by_slug(pool: &PgPool, slug: &str) -> Result<Plan, AppError> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE slug = $1 AND is_active = true")
        .bind(slug)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Plan '{slug}' not found")))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Plan, AppError> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))
}

pub async fn create(pool: &PgPool, input: &CreatePlan) -> Result<Plan, AppError> {
    input.validate()?;

    let plan = sqlx::query_as::<_, Plan>(
        r#"
        INSERT INTO plans (
            name, slug, description, download_mbps, upload_mbps,
            monthly_price_cents, installation_fee_cents, data_cap_gb
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.slug)
    .bind(&input.description)
    .bind(input.download_mbps)
    .bind(input.upload_mbps)
    .bind(input.monthly_price_cents)
    .bind(input.installation_fee_cents)
    .bind(input.data_cap_gb)
    .fetch_one(pool)
    .await
    .map_err(map_slug_conflict)?;

    tracing::info!(plan_id = %plan.id, slug = %plan.slug, "Plan created");
    Ok(plan)
}

pub async fn update(pool: &PgPool, id: Uuid, input: &UpdatePlan) -> Result<Plan, AppError> {
    input.validate()?;

    sqlx::query_as::<_, Plan>(
        r#"
        UPDATE plans SET
            name                   = COALESCE($2, name),
            description            = COALESCE($3, description),
            download_mbps          = COALESCE($4, download_mbps),
            upload_mbps            = COALESCE($5, upload_mbps),
            monthly_price_cents    = COALESCE($6, monthly_price_cents),
            installation_fee_cents = COALESCE($7, installation_fee_cents),
            data_cap_gb            = COALESCE($8, data_cap_gb),
            is_active              = COALESCE($9, is_active),
            updated_at             = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.download_mbps)
    .bind(input.upload_mbps)
    .bind(input.monthly_price_cents)
    .bind(input.installation_fee_cents)
    .bind(input.data_cap_gb)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))
}

/// Retire a plan from the public catalogue. Existing orders and subscriptions
/// keep pointing at it.
pub async fn deactivate(pool: &PgPool, id: Uuid) -> Result<Plan, AppError> {
    let plan = sqlx::query_as::<_, Plan>(
        "UPDATE plans SET is_active = false, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

    tracing::info!(plan_id = %plan.id, "Plan deactivated");
    Ok(plan)
}
