//! Invoice Repository
//!
//! List filtering builds SQL dynamically; unset filters add no clause.
//! Date bounds arrive as Unix millis — the handler/service layer owns
//! date-string parsing.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{Invoice, InvoiceStatistics, PaymentStatus, RevenuePoint};

const COLUMNS: &str = "id, invoice_number, order_id, customer_id, staff_id, payment_status, \
                       payment_method, amount, promotion_id, created_at, updated_at";

/// Resolved list filter (dates already converted to millis)
#[derive(Debug, Clone, Default)]
pub struct InvoiceListQuery {
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
    pub customer_id: Option<i64>,
    pub staff_id: Option<i64>,
    /// Inclusive lower bound on `created_at`
    pub start_millis: Option<i64>,
    /// Exclusive upper bound on `created_at`
    pub end_millis: Option<i64>,
    pub search: Option<String>,
}

pub async fn find_all(pool: &SqlitePool, query: &InvoiceListQuery) -> RepoResult<Vec<Invoice>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM invoice WHERE 1=1"));

    if let Some(status) = query.payment_status {
        qb.push(" AND payment_status = ").push_bind(status.as_str());
    }
    if let Some(method) = &query.payment_method {
        qb.push(" AND payment_method = ").push_bind(method.clone());
    }
    if let Some(customer_id) = query.customer_id {
        qb.push(" AND customer_id = ").push_bind(customer_id);
    }
    if let Some(staff_id) = query.staff_id {
        qb.push(" AND staff_id = ").push_bind(staff_id);
    }
    if let Some(start) = query.start_millis {
        qb.push(" AND created_at >= ").push_bind(start);
    }
    if let Some(end) = query.end_millis {
        qb.push(" AND created_at < ").push_bind(end);
    }
    if let Some(search) = &query.search {
        qb.push(" AND invoice_number LIKE ")
            .push_bind(format!("%{}%", search));
    }

    qb.push(" ORDER BY created_at DESC");

    let invoices = qb.build_query_as::<Invoice>().fetch_all(pool).await?;
    Ok(invoices)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Invoice>> {
    let invoice =
        sqlx::query_as::<_, Invoice>(&format!("SELECT {COLUMNS} FROM invoice WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(invoice)
}

pub async fn find_by_number(pool: &SqlitePool, number: &str) -> RepoResult<Option<Invoice>> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {COLUMNS} FROM invoice WHERE invoice_number = ? LIMIT 1"
    ))
    .bind(number)
    .fetch_optional(pool)
    .await?;
    Ok(invoice)
}

pub async fn find_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Option<Invoice>> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {COLUMNS} FROM invoice WHERE order_id = ? ORDER BY created_at DESC LIMIT 1"
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(invoice)
}

/// Duplicate check on `invoice_number`, optionally excluding one record.
pub async fn number_exists(
    pool: &SqlitePool,
    number: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM invoice WHERE invoice_number = ? AND (? IS NULL OR id != ?)",
    )
    .bind(number)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn insert(pool: &SqlitePool, invoice: &Invoice) -> RepoResult<Invoice> {
    sqlx::query(
        "INSERT INTO invoice (id, invoice_number, order_id, customer_id, staff_id, \
         payment_status, payment_method, amount, promotion_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(invoice.id)
    .bind(&invoice.invoice_number)
    .bind(invoice.order_id)
    .bind(invoice.customer_id)
    .bind(invoice.staff_id)
    .bind(invoice.payment_status.as_str())
    .bind(&invoice.payment_method)
    .bind(invoice.amount)
    .bind(invoice.promotion_id)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .execute(pool)
    .await?;
    find_by_id(pool, invoice.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create invoice".into()))
}

/// Write the merged row produced by the service's patch logic.
/// Status is deliberately not written here; lifecycle transitions go
/// through [`mark_paid`] / [`mark_cancelled`].
pub async fn update(pool: &SqlitePool, invoice: &Invoice) -> RepoResult<Invoice> {
    let rows = sqlx::query(
        "UPDATE invoice SET invoice_number = ?, order_id = ?, customer_id = ?, staff_id = ?, \
         payment_method = ?, amount = ?, promotion_id = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&invoice.invoice_number)
    .bind(invoice.order_id)
    .bind(invoice.customer_id)
    .bind(invoice.staff_id)
    .bind(&invoice.payment_method)
    .bind(invoice.amount)
    .bind(invoice.promotion_id)
    .bind(invoice.updated_at)
    .bind(invoice.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Invoice {} not found",
            invoice.id
        )));
    }
    find_by_id(pool, invoice.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Invoice {} not found", invoice.id)))
}

pub async fn mark_paid(
    pool: &SqlitePool,
    id: i64,
    payment_method: &str,
    promotion_id: Option<i64>,
    updated_at: i64,
) -> RepoResult<Invoice> {
    sqlx::query(
        "UPDATE invoice SET payment_status = 'paid', payment_method = ?, promotion_id = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(payment_method)
    .bind(promotion_id)
    .bind(updated_at)
    .bind(id)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Invoice {id} not found")))
}

pub async fn mark_cancelled(pool: &SqlitePool, id: i64, updated_at: i64) -> RepoResult<Invoice> {
    sqlx::query("UPDATE invoice SET payment_status = 'cancelled', updated_at = ? WHERE id = ?")
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Invoice {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM invoice WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn statistics(pool: &SqlitePool) -> RepoResult<InvoiceStatistics> {
    let stats = sqlx::query_as::<_, InvoiceStatistics>(
        "SELECT \
           COUNT(*) AS total_invoices, \
           CAST(COALESCE(SUM(payment_status = 'pending'), 0) AS INTEGER) AS pending_invoices, \
           CAST(COALESCE(SUM(payment_status = 'paid'), 0) AS INTEGER) AS paid_invoices, \
           CAST(COALESCE(SUM(payment_status = 'cancelled'), 0) AS INTEGER) AS cancelled_invoices, \
           CAST(COALESCE(SUM(CASE WHEN payment_status = 'paid' THEN amount END), 0) AS REAL) AS total_revenue, \
           CAST(COALESCE(SUM(CASE WHEN payment_status = 'pending' THEN amount END), 0) AS REAL) AS pending_amount \
         FROM invoice",
    )
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

/// Per-day revenue over paid invoices in `[start, end)` millis.
pub async fn revenue_by_day(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<RevenuePoint>> {
    let points = sqlx::query_as::<_, RevenuePoint>(
        "SELECT \
           strftime('%Y-%m-%d', created_at / 1000, 'unixepoch') AS date, \
           CAST(COALESCE(SUM(amount), 0) AS REAL) AS revenue, \
           COUNT(*) AS invoice_count \
         FROM invoice \
         WHERE payment_status = 'paid' AND created_at >= ? AND created_at < ? \
         GROUP BY date \
         ORDER BY date",
    )
    .bind(start_millis)
    .bind(end_millis)
    .fetch_all(pool)
    .await?;
    Ok(points)
}
