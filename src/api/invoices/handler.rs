//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    Invoice, InvoiceCreate, InvoiceFilter, InvoiceStatistics, InvoiceUpdate, RevenueReport,
};
use crate::utils::{
    ApiResponse, AppError, AppResult, created, ok, ok_with_count, ok_with_message,
};

/// GET /api/invoices - 发票列表 (可组合过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<InvoiceFilter>,
) -> AppResult<Json<ApiResponse<Vec<Invoice>>>> {
    let invoices = state.invoices.list(filter).await?;
    Ok(ok_with_count(invoices))
}

/// GET /api/invoices/statistics - 汇总统计
pub async fn statistics(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<InvoiceStatistics>>> {
    let stats = state.invoices.statistics().await?;
    Ok(ok(stats))
}

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/invoices/revenue?start_date&end_date - 日期范围营收
///
/// Both bounds are required; the check happens here, before the service
/// is invoked.
pub async fn revenue(
    State(state): State<ServerState>,
    Query(query): Query<RevenueQuery>,
) -> AppResult<Json<ApiResponse<RevenueReport>>> {
    let (Some(start_date), Some(end_date)) = (&query.start_date, &query.end_date) else {
        return Err(AppError::validation(
            "start_date and end_date are required",
        ));
    };
    let report = state.invoices.revenue(start_date, end_date).await?;
    Ok(ok(report))
}

/// GET /api/invoices/number/:invoice_number - 按发票号查询
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(invoice_number): Path<String>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = state.invoices.get_by_number(&invoice_number).await?;
    Ok(ok(invoice))
}

/// GET /api/invoices/order/:order_id - 按订单查询
pub async fn get_by_order(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = state.invoices.get_by_order(order_id).await?;
    Ok(ok(invoice))
}

/// GET /api/invoices/:id - 按 ID 查询
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = state.invoices.get(id).await?;
    Ok(ok(invoice))
}

/// POST /api/invoices - 创建发票
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Invoice>>)> {
    let invoice = state.invoices.create(payload).await?;
    Ok(created(invoice))
}

/// PUT /api/invoices/:id - 更新发票 (部分更新)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InvoiceUpdate>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = state.invoices.update(id, payload).await?;
    Ok(ok(invoice))
}

/// DELETE /api/invoices/:id - 删除发票，返回被删除的记录
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = state.invoices.delete(id).await?;
    Ok(ok_with_message(invoice, "Invoice deleted"))
}

#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    pub payment_method: Option<String>,
    pub promotion_id: Option<i64>,
}

/// PATCH /api/invoices/:id/paid - 标记为已支付
pub async fn mark_as_paid(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MarkPaidRequest>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let method = payload.payment_method.unwrap_or_default();
    let invoice = state
        .invoices
        .mark_as_paid(id, &method, payload.promotion_id)
        .await?;
    Ok(ok_with_message(invoice, "Invoice marked as paid"))
}

/// PATCH /api/invoices/:id/cancel - 取消发票
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = state.invoices.cancel(id).await?;
    Ok(ok_with_message(invoice, "Invoice cancelled"))
}
