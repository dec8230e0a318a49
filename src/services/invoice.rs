//! Invoice Service
//!
//! Lifecycle: pending → paid (mark_as_paid) or pending → cancelled
//! (cancel); paid and cancelled are terminal. Re-invoking either
//! transition from a terminal state is a business-rule error, never a
//! silent success.

use sqlx::SqlitePool;

use crate::db::models::{
    Invoice, InvoiceCreate, InvoiceFilter, InvoiceStatistics, InvoiceUpdate, PaymentStatus,
    RevenueReport,
};
use crate::db::repository::invoice as invoice_repo;
use crate::db::repository::invoice::InvoiceListQuery;
use crate::utils::{AppError, AppResult, id, time};

#[derive(Clone)]
pub struct InvoiceService {
    pool: SqlitePool,
}

impl InvoiceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List invoices; every filter is optional and they combine
    /// independently.
    pub async fn list(&self, filter: InvoiceFilter) -> AppResult<Vec<Invoice>> {
        let payment_status = match filter.payment_status.as_deref() {
            Some(value) => Some(PaymentStatus::parse(value).ok_or_else(|| {
                AppError::validation(
                    "payment_status must be one of: pending, paid, cancelled",
                )
            })?),
            None => None,
        };
        let start_millis = match &filter.start_date {
            Some(date) => Some(time::day_start_millis(time::parse_date(date)?)),
            None => None,
        };
        let end_millis = match &filter.end_date {
            Some(date) => Some(time::day_end_millis(time::parse_date(date)?)),
            None => None,
        };

        let query = InvoiceListQuery {
            payment_status,
            payment_method: filter.payment_method,
            customer_id: filter.customer_id,
            staff_id: filter.staff_id,
            start_millis,
            end_millis,
            search: filter.search,
        };
        Ok(invoice_repo::find_all(&self.pool, &query).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<Invoice> {
        invoice_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))
    }

    pub async fn get_by_number(&self, number: &str) -> AppResult<Invoice> {
        invoice_repo::find_by_number(&self.pool, number)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))
    }

    pub async fn get_by_order(&self, order_id: i64) -> AppResult<Invoice> {
        invoice_repo::find_by_order(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))
    }

    pub async fn create(&self, payload: InvoiceCreate) -> AppResult<Invoice> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(AppError::validation(errors.join(", ")));
        }

        // validate() guarantees these are present
        let number = payload.invoice_number.unwrap_or_default().trim().to_string();
        let order_id = payload.order_id.unwrap_or_default();
        let amount = payload.amount.unwrap_or_default();

        if invoice_repo::number_exists(&self.pool, &number, None).await? {
            return Err(AppError::conflict(format!(
                "Invoice with number '{number}' already exists"
            )));
        }

        let now = time::now_millis();
        let invoice = Invoice {
            id: id::snowflake_id(),
            invoice_number: number,
            order_id,
            customer_id: payload.customer_id,
            staff_id: payload.staff_id,
            payment_status: PaymentStatus::Pending,
            payment_method: payload.payment_method,
            amount,
            promotion_id: payload.promotion_id,
            created_at: now,
            updated_at: now,
        };
        let created = invoice_repo::insert(&self.pool, &invoice).await?;
        tracing::info!(invoice = %created.invoice_number, "Invoice created");
        Ok(created)
    }

    /// Partial update. The lifecycle status is not patchable here; the
    /// duplicate check runs only when the invoice number changes.
    pub async fn update(&self, id: i64, patch: InvoiceUpdate) -> AppResult<Invoice> {
        let existing = invoice_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        let merged = InvoiceCreate {
            invoice_number: patch
                .invoice_number
                .clone()
                .or_else(|| Some(existing.invoice_number.clone())),
            order_id: patch.order_id.or(Some(existing.order_id)),
            customer_id: patch.customer_id.or(existing.customer_id),
            staff_id: patch.staff_id.or(existing.staff_id),
            payment_method: patch.payment_method.clone().or_else(|| existing.payment_method.clone()),
            amount: patch.amount.or(Some(existing.amount)),
            promotion_id: patch.promotion_id.or(existing.promotion_id),
        };

        let errors = merged.validate();
        if !errors.is_empty() {
            return Err(AppError::validation(errors.join(", ")));
        }

        let number = merged.invoice_number.unwrap_or_default().trim().to_string();
        if number != existing.invoice_number
            && invoice_repo::number_exists(&self.pool, &number, Some(id)).await?
        {
            return Err(AppError::conflict(format!(
                "Invoice with number '{number}' already exists"
            )));
        }

        let candidate = Invoice {
            id,
            invoice_number: number,
            order_id: merged.order_id.unwrap_or_default(),
            customer_id: merged.customer_id,
            staff_id: merged.staff_id,
            payment_status: existing.payment_status,
            payment_method: merged.payment_method,
            amount: merged.amount.unwrap_or_default(),
            promotion_id: merged.promotion_id,
            created_at: existing.created_at,
            updated_at: time::now_millis(),
        };
        Ok(invoice_repo::update(&self.pool, &candidate).await?)
    }

    /// Delete an invoice. Paid invoices are protected; this failure is a
    /// business-rule error (400), distinct from NotFound (404).
    pub async fn delete(&self, id: i64) -> AppResult<Invoice> {
        let existing = invoice_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        if existing.payment_status == PaymentStatus::Paid {
            return Err(AppError::business_rule("Cannot delete a paid invoice"));
        }

        invoice_repo::delete(&self.pool, id).await?;
        tracing::info!(invoice = %existing.invoice_number, "Invoice deleted");
        Ok(existing)
    }

    /// pending → paid. Fails from any terminal state without touching
    /// the record.
    pub async fn mark_as_paid(
        &self,
        id: i64,
        payment_method: &str,
        promotion_id: Option<i64>,
    ) -> AppResult<Invoice> {
        let existing = invoice_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        match existing.payment_status {
            PaymentStatus::Paid => {
                return Err(AppError::business_rule("Invoice is already paid"));
            }
            PaymentStatus::Cancelled => {
                return Err(AppError::business_rule(
                    "Cannot mark a cancelled invoice as paid",
                ));
            }
            PaymentStatus::Pending => {}
        }

        if payment_method.trim().is_empty() {
            return Err(AppError::validation("payment_method is required"));
        }

        let updated = invoice_repo::mark_paid(
            &self.pool,
            id,
            payment_method.trim(),
            promotion_id,
            time::now_millis(),
        )
        .await?;
        tracing::info!(invoice = %updated.invoice_number, method = payment_method, "Invoice paid");
        Ok(updated)
    }

    /// pending → cancelled. Idempotent rejection: cancelling an already
    /// cancelled invoice fails rather than silently succeeding.
    pub async fn cancel(&self, id: i64) -> AppResult<Invoice> {
        let existing = invoice_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        match existing.payment_status {
            PaymentStatus::Cancelled => {
                return Err(AppError::business_rule("Invoice is already cancelled"));
            }
            PaymentStatus::Paid => {
                return Err(AppError::business_rule("Cannot cancel a paid invoice"));
            }
            PaymentStatus::Pending => {}
        }

        let updated = invoice_repo::mark_cancelled(&self.pool, id, time::now_millis()).await?;
        tracing::info!(invoice = %updated.invoice_number, "Invoice cancelled");
        Ok(updated)
    }

    pub async fn statistics(&self) -> AppResult<InvoiceStatistics> {
        Ok(invoice_repo::statistics(&self.pool).await?)
    }

    /// Revenue over paid invoices in `[start_date, end_date]` (business
    /// dates, inclusive). Bound presence is enforced at the HTTP
    /// boundary; this method assumes both are given.
    pub async fn revenue(&self, start_date: &str, end_date: &str) -> AppResult<RevenueReport> {
        let start = time::parse_date(start_date)?;
        let end = time::parse_date(end_date)?;
        if end < start {
            return Err(AppError::validation(
                "end_date must not be before start_date",
            ));
        }

        let daily = invoice_repo::revenue_by_day(
            &self.pool,
            time::day_start_millis(start),
            time::day_end_millis(end),
        )
        .await?;

        let total_revenue = daily.iter().map(|p| p.revenue).sum();
        let invoice_count = daily.iter().map(|p| p.invoice_count).sum();
        Ok(RevenueReport {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            total_revenue,
            invoice_count,
            daily,
        })
    }
}
