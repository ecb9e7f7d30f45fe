//! Installation scheduling and field updates.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::installation::{
    InstallationJob, InstallationStatus, InstallationStatusUpdate, ScheduleInstallation,
};
use crate::models::order::OrderStatus;
use crate::models::user::UserRole;
use crate::services::{auth, order};

/// Reject windows that are in the past or empty.
pub fn validate_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if start <= now {
        return Err(AppError::Validation(
            "scheduled_start must be in the future".to_string(),
        ));
    }
    if end <= start {
        return Err(AppError::Validation(
            "scheduled_end must be after scheduled_start".to_string(),
        ));
    }
    Ok(())
}

/// Whether `user` may change the status of `job`. Technicians are limited to
/// their own assignments.
pub fn may_update(user: &CurrentUser, job: &InstallationJob) -> bool {
    match user.role {
        UserRole::Admin | UserRole::Ops => true,
        UserRole::Tech => job.technician_id == Some(user.id),
        _ => false,
    }
}

/// Book an installation for a confirmed order and move the order to scheduled.
pub async fn schedule(
    pool: &PgPool,
    input: &ScheduleInstallation,
) -> Result<InstallationJob, AppError> {
    validate_window(input.scheduled_start, input.scheduled_end, Utc::now())?;

    let target = order::find_by_id(pool, input.order_id).await?;

    if let Some(technician_id) = input.technician_id {
        let technician = auth::find_user_by_id(pool, technician_id).await?;
        if technician.role != UserRole::Tech || !technician.is_active {
            return Err(AppError::Validation(
                "technician_id must reference an active technician".to_string(),
            ));
        }
    }

    let mut tx = pool.begin().await?;

    // Claims the order; a concurrent booking finds it no longer confirmed.
    order::transition(&mut *tx, target.id, target.status, OrderStatus::Scheduled).await?;

    let job = sqlx::query_as::<_, InstallationJob>(
        r#"
        INSERT INTO installation_jobs (
            order_id, customer_id, technician_id, scheduled_start, scheduled_end, status, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(target.id)
    .bind(target.customer_id)
    .bind(input.technician_id)
    .bind(input.scheduled_start)
    .bind(input.scheduled_end)
    .bind(InstallationStatus::Scheduled)
    .bind(&input.notes)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        job_id = %job.id,
        order_id = %target.id,
        technician_id = ?job.technician_id,
        scheduled_start = %job.scheduled_start,
        "Installation scheduled"
    );
    Ok(job)
}

/// The order status a job moving to `next` implies. Only completion touches
/// the order, and only a scheduled order can be completed.
pub fn order_follow_up(
    next: InstallationStatus,
    order_status: OrderStatus,
) -> Result<Option<OrderStatus>, AppError> {
    if next != InstallationStatus::Completed {
        return Ok(None);
    }
    if !order_status.can_transition_to(OrderStatus::Completed) {
        return Err(AppError::InvalidTransition(format!(
            "order is {order_status:?}; its installation cannot be completed"
        )));
    }
    Ok(Some(OrderStatus::Completed))
}

/// Open jobs assigned to a technician, soonest first.
pub async fn list_assigned(
    pool: &PgPool,
    technician_id: Uuid,
) -> Result<Vec<InstallationJob>, AppError> {
    let jobs = sqlx::query_as::<_, InstallationJob>(
        "SELECT * FROM installation_jobs \
         WHERE technician_id = $1 AND status NOT IN ($2, $3) \
         ORDER BY scheduled_start ASC",
    )
    .bind(technician_id)
    .bind(InstallationStatus::Completed)
    .bind(InstallationStatus::Cancelled)
    .fetch_all(pool)
    .await?;
    Ok(jobs)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<InstallationJob, AppError> {
    sqlx::query_as::<_, InstallationJob>("SELECT * FROM installation_jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Installation job not found".to_string()))
}

/// Record progress on a job. Completing it completes the order in the same
/// transaction.
pub async fn update_status(
    pool: &PgPool,
    user: &CurrentUser,
    id: Uuid,
    input: &InstallationStatusUpdate,
) -> Result<InstallationJob, AppError> {
    let job = find_by_id(pool, id).await?;

    if !may_update(user, &job) {
        tracing::warn!(user_id = %user.id, job_id = %id, "Technician not assigned to job");
        return Err(AppError::Unauthorized);
    }
    if job.status.is_terminal() {
        return Err(AppError::InvalidTransition(format!(
            "job is already {:?}",
            job.status
        )));
    }

    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, InstallationJob>(
        r#"
        UPDATE installation_jobs SET
            status = $2,
            notes  = COALESCE($3, notes)
        WHERE id = $1 AND status = $4
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(input.status)
    .bind(&input.notes)
    .bind(job.status)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| {
        AppError::InvalidTransition(format!("job is no longer {:?}", job.status))
    })?;

    if let Some(order_id) = updated.order_id {
        let order_status: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;
        if let Some(current) = order_status {
            if let Some(next) = order_follow_up(updated.status, current)? {
                order::transition(&mut *tx, order_id, current, next).await?;
            }
        }
    }

    tx.commit().await?;

    tracing::info!(job_id = %id, from = ?job.status, to = ?updated.status, "Installation status changed");
    Ok(updated)
}
