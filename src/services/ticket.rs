//! Support tickets: customers raise them, support staff work them.

use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::ticket::{
    CreateTicket, Ticket, TicketCategory, TicketPriority, TicketStatus, UpdateTicket,
};
use crate::services::reference_number;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TicketFilters {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
    pub customer_id: Option<Uuid>,
    /// Matches ticket number or subject.
    pub search: Option<String>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &TicketFilters) {
    qb.push(" WHERE 1 = 1");
    if let Some(status) = filters.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(priority) = filters.priority {
        qb.push(" AND priority = ").push_bind(priority);
    }
    if let Some(category) = filters.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(customer_id) = filters.customer_id {
        qb.push(" AND customer_id = ").push_bind(customer_id);
    }
    if let Some(search) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        qb.push(" AND (ticket_number ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR subject ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub async fn create(
    pool: &PgPool,
    customer_id: Uuid,
    input: &CreateTicket,
) -> Result<Ticket, AppError> {
    input.validate()?;

    let ticket = sqlx::query_as::<_, Ticket>(
        r#"
        INSERT INTO tickets (ticket_number, customer_id, subject, description, status, priority, category)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(reference_number("TKT"))
    .bind(customer_id)
    .bind(input.subject.trim())
    .bind(&input.description)
    .bind(TicketStatus::Pending)
    .bind(input.priority)
    .bind(input.category)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        ticket_id = %ticket.id,
        ticket_number = %ticket.ticket_number,
        priority = ?ticket.priority,
        "Ticket opened"
    );
    Ok(ticket)
}

/// A customer's own tickets, newest first.
pub async fn list_for_customer(pool: &PgPool, customer_id: Uuid) -> Result<Vec<Ticket>, AppError> {
    let tickets = sqlx::query_as::<_, Ticket>(
        "SELECT * FROM tickets WHERE customer_id = $1 ORDER BY created_at DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(tickets)
}

pub async fn list(
    pool: &PgPool,
    filters: &TicketFilters,
    pagination: &Pagination,
) -> Result<PagedResult<Ticket>, AppError> {
    let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tickets");
    push_filters(&mut count_qb, filters);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let window = pagination.window();
    let mut data_qb = QueryBuilder::<Postgres>::new("SELECT * FROM tickets");
    push_filters(&mut data_qb, filters);
    data_qb
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
    let items = data_qb.build_query_as::<Ticket>().fetch_all(pool).await?;

    Ok(PagedResult::new(items, total, window))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Ticket, AppError> {
    sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))
}

/// Change a ticket's status or priority.
pub async fn update(pool: &PgPool, id: Uuid, input: &UpdateTicket) -> Result<Ticket, AppError> {
    let ticket = find_by_id(pool, id).await?;

    if let Some(next) = input.status {
        if !ticket.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition(format!(
                "{:?} -> {:?}",
                ticket.status, next
            )));
        }
    }

    let updated = sqlx::query_as::<_, Ticket>(
        r#"
        UPDATE tickets SET
            status     = COALESCE($2, status),
            priority   = COALESCE($3, priority),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(input.status)
    .bind(input.priority)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        ticket_id = %id,
        status = ?updated.status,
        priority = ?updated.priority,
        "Ticket updated"
    );
    Ok(updated)
}
