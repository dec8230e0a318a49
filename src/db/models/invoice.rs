//! Invoice Model

use serde::{Deserialize, Serialize};

use crate::utils::validation::{self, MAX_SHORT_TEXT_LEN};

/// Invoice payment status
///
/// `Paid` and `Cancelled` are terminal: no further transition is
/// permitted out of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a query-string value. Filters accept the status as a raw
    /// string so an invalid value becomes a regular validation error
    /// instead of an extractor reject.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "cancelled" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }
}

/// Invoice entity (发票)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub order_id: i64,
    pub customer_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub amount: f64,
    pub promotion_id: Option<i64>,
    /// Unix millis
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create invoice payload
///
/// Status is not part of the payload: every invoice starts `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub invoice_number: Option<String>,
    pub order_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub payment_method: Option<String>,
    pub amount: Option<f64>,
    pub promotion_id: Option<i64>,
}

impl InvoiceCreate {
    /// Validate the candidate; every failure is collected.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        validation::require_text(self.invoice_number.as_deref(), "invoice_number", &mut errors);
        validation::check_text_len(
            self.invoice_number.as_deref(),
            "invoice_number",
            MAX_SHORT_TEXT_LEN,
            &mut errors,
        );

        if self.order_id.is_none() {
            errors.push("order_id is required".to_string());
        }

        match self.amount {
            None => errors.push("amount is required".to_string()),
            Some(amount) if amount < 0.0 => {
                errors.push("amount must be a non-negative number".to_string())
            }
            Some(_) => {}
        }

        validation::check_text_len(
            self.payment_method.as_deref(),
            "payment_method",
            MAX_SHORT_TEXT_LEN,
            &mut errors,
        );

        errors
    }
}

/// Update invoice payload — partial patch.
///
/// Status transitions are not patchable here; they go through the
/// dedicated `paid` / `cancel` actions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceUpdate {
    pub invoice_number: Option<String>,
    pub order_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub payment_method: Option<String>,
    pub amount: Option<f64>,
    pub promotion_id: Option<i64>,
}

/// List filter — every field is independently optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceFilter {
    /// Raw status string, classified in the service (see
    /// [`PaymentStatus::parse`])
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub customer_id: Option<i64>,
    pub staff_id: Option<i64>,
    /// YYYY-MM-DD, inclusive
    pub start_date: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub end_date: Option<String>,
    /// Free-text match on invoice number
    pub search: Option<String>,
}

/// Aggregate counters across all invoices
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InvoiceStatistics {
    pub total_invoices: i64,
    pub pending_invoices: i64,
    pub paid_invoices: i64,
    pub cancelled_invoices: i64,
    /// Sum of paid amounts
    pub total_revenue: f64,
    /// Sum of amounts still pending
    pub pending_amount: f64,
}

/// One day of revenue inside a date-range report
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RevenuePoint {
    /// YYYY-MM-DD
    pub date: String,
    pub revenue: f64,
    pub invoice_count: i64,
}

/// Revenue aggregated over a date range (paid invoices only)
#[derive(Debug, Clone, Serialize)]
pub struct RevenueReport {
    pub start_date: String,
    pub end_date: String,
    pub total_revenue: f64,
    pub invoice_count: i64,
    pub daily: Vec<RevenuePoint>,
}
