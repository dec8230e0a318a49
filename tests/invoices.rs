//! Invoice endpoint tests: lifecycle guards, lookups, filters,
//! statistics and revenue reporting.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

use common::{message, spawn};

async fn create_invoice(app: &common::TestApp, number: &str, amount: f64) -> i64 {
    let (status, body) = app
        .post(
            "/api/invoices",
            json!({"invoice_number": number, "order_id": 100, "amount": amount}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

/// Noon UTC of a YYYY-MM-DD date, as Unix millis
fn noon_millis(date: &str) -> i64 {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

/// Insert an invoice row directly, bypassing the API, to control
/// `created_at` for the date-range assertions.
async fn insert_raw(
    pool: &SqlitePool,
    id: i64,
    number: &str,
    status: &str,
    amount: f64,
    created_at: i64,
) {
    sqlx::query(
        "INSERT INTO invoice (id, invoice_number, order_id, payment_status, amount, \
         created_at, updated_at) VALUES (?, ?, 1, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(number)
    .bind(status)
    .bind(amount)
    .bind(created_at)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn create_starts_pending() {
    let app = spawn().await;

    let (status, body) = app
        .post(
            "/api/invoices",
            json!({"invoice_number": "INV-001", "order_id": 42, "amount": 25.5}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["payment_status"], json!("pending"));
    assert_eq!(body["data"]["amount"], json!(25.5));
    assert_eq!(body["data"]["order_id"], json!(42));
}

#[tokio::test]
async fn create_collects_all_validation_errors() {
    let app = spawn().await;

    let (status, body) = app.post("/api/invoices", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("invoice_number is required"));
    assert!(message(&body).contains("order_id is required"));
    assert!(message(&body).contains("amount is required"));
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let app = spawn().await;

    let (status, body) = app
        .post(
            "/api/invoices",
            json!({"invoice_number": "INV-001", "order_id": 1, "amount": -3.0}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("amount must be a non-negative number"));
}

#[tokio::test]
async fn duplicate_invoice_number_conflicts() {
    let app = spawn().await;

    create_invoice(&app, "INV-001", 10.0).await;
    let (status, body) = app
        .post(
            "/api/invoices",
            json!({"invoice_number": "INV-001", "order_id": 2, "amount": 5.0}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(message(&body).contains("already exists"));
}

#[tokio::test]
async fn lookup_by_id_number_and_order() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-007", 99.0).await;

    let (status, body) = app.get(&format!("/api/invoices/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["invoice_number"], json!("INV-007"));

    let (status, body) = app.get("/api/invoices/number/INV-007").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(id));

    let (status, body) = app.get("/api/invoices/order/100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(id));

    let (status, body) = app.get("/api/invoices/number/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Invoice not found");

    let (status, _) = app.get("/api/invoices/order/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/invoices/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_combine_independently() {
    let app = spawn().await;

    let a = create_invoice(&app, "INV-A", 10.0).await;
    let b = create_invoice(&app, "INV-B", 20.0).await;
    create_invoice(&app, "OTHER-C", 30.0).await;

    app.patch(
        &format!("/api/invoices/{a}/paid"),
        json!({"payment_method": "cash"}),
    )
    .await;
    app.patch(
        &format!("/api/invoices/{b}/paid"),
        json!({"payment_method": "card"}),
    )
    .await;

    // No filters: everything
    let (_, body) = app.get("/api/invoices").await;
    assert_eq!(body["count"], json!(3));

    // By status
    let (_, body) = app.get("/api/invoices?payment_status=paid").await;
    assert_eq!(body["count"], json!(2));
    let (_, body) = app.get("/api/invoices?payment_status=pending").await;
    assert_eq!(body["count"], json!(1));

    // Status + method combine
    let (_, body) = app
        .get("/api/invoices?payment_status=paid&payment_method=cash")
        .await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["invoice_number"], json!("INV-A"));

    // Free-text search on invoice number
    let (_, body) = app.get("/api/invoices?search=INV").await;
    assert_eq!(body["count"], json!(2));

    // Date range including today
    let today = chrono::Utc::now().date_naive().to_string();
    let (_, body) = app
        .get(&format!(
            "/api/invoices?start_date={today}&end_date={today}"
        ))
        .await;
    assert_eq!(body["count"], json!(3));
}

#[tokio::test]
async fn list_rejects_unknown_payment_status_with_envelope() {
    let app = spawn().await;

    let (status, body) = app.get("/api/invoices?payment_status=refunded").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        message(&body),
        "payment_status must be one of: pending, paid, cancelled"
    );
}

#[tokio::test]
async fn update_is_partial_and_checks_number_uniqueness() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-001", 10.0).await;
    create_invoice(&app, "INV-002", 20.0).await;

    // Patch only the amount
    let (status, body) = app
        .put(&format!("/api/invoices/{id}"), json!({"amount": 15.0}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount"], json!(15.0));
    assert_eq!(body["data"]["invoice_number"], json!("INV-001"));

    // Own number: no conflict
    let (status, _) = app
        .put(
            &format!("/api/invoices/{id}"),
            json!({"invoice_number": "INV-001"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Someone else's number: conflict
    let (status, body) = app
        .put(
            &format!("/api/invoices/{id}"),
            json!({"invoice_number": "INV-002"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(message(&body).contains("already exists"));
}

#[tokio::test]
async fn mark_paid_sets_method_and_promotion() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-001", 10.0).await;

    let (status, body) = app
        .patch(
            &format!("/api/invoices/{id}/paid"),
            json!({"payment_method": "card", "promotion_id": 77}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["payment_status"], json!("paid"));
    assert_eq!(body["data"]["payment_method"], json!("card"));
    assert_eq!(body["data"]["promotion_id"], json!(77));
}

#[tokio::test]
async fn mark_paid_twice_fails_and_keeps_status() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-001", 10.0).await;
    app.patch(
        &format!("/api/invoices/{id}/paid"),
        json!({"payment_method": "cash"}),
    )
    .await;

    let (status, body) = app
        .patch(
            &format!("/api/invoices/{id}/paid"),
            json!({"payment_method": "card"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("already paid"));

    let (_, body) = app.get(&format!("/api/invoices/{id}")).await;
    assert_eq!(body["data"]["payment_status"], json!("paid"));
    assert_eq!(body["data"]["payment_method"], json!("cash"));
}

#[tokio::test]
async fn mark_paid_on_cancelled_fails() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-001", 10.0).await;
    app.patch(&format!("/api/invoices/{id}/cancel"), json!({}))
        .await;

    let (status, body) = app
        .patch(
            &format!("/api/invoices/{id}/paid"),
            json!({"payment_method": "cash"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("cancelled"));

    let (_, body) = app.get(&format!("/api/invoices/{id}")).await;
    assert_eq!(body["data"]["payment_status"], json!("cancelled"));
}

#[tokio::test]
async fn cancel_is_rejected_from_terminal_states() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-001", 10.0).await;
    let (status, _) = app
        .patch(&format!("/api/invoices/{id}/cancel"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Idempotent rejection, not silent success
    let (status, body) = app
        .patch(&format!("/api/invoices/{id}/cancel"), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("already cancelled"));

    let paid = create_invoice(&app, "INV-002", 10.0).await;
    app.patch(
        &format!("/api/invoices/{paid}/paid"),
        json!({"payment_method": "cash"}),
    )
    .await;
    let (status, body) = app
        .patch(&format!("/api/invoices/{paid}/cancel"), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("paid"));
}

#[tokio::test]
async fn delete_paid_invoice_is_blocked() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-001", 10.0).await;
    app.patch(
        &format!("/api/invoices/{id}/paid"),
        json!({"payment_method": "cash"}),
    )
    .await;

    let (status, body) = app.delete(&format!("/api/invoices/{id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("Cannot delete"));

    // Still there
    let (status, _) = app.get(&format!("/api/invoices/{id}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_pending_invoice_returns_record() {
    let app = spawn().await;

    let id = create_invoice(&app, "INV-001", 10.0).await;

    let (status, body) = app.delete(&format!("/api/invoices/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["invoice_number"], json!("INV-001"));

    let (status, _) = app.get(&format!("/api/invoices/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn revenue_requires_both_dates() {
    let app = spawn().await;

    let (status, body) = app.get("/api/invoices/revenue").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("start_date and end_date are required"));

    let (status, _) = app
        .get("/api/invoices/revenue?start_date=2025-01-01")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/invoices/revenue?end_date=2025-01-31").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn revenue_aggregates_paid_invoices_in_range() {
    let app = spawn().await;
    let pool = &app.state.db.pool;

    insert_raw(pool, 1, "INV-A", "paid", 10.0, noon_millis("2025-03-01")).await;
    insert_raw(pool, 2, "INV-B", "paid", 15.0, noon_millis("2025-03-01")).await;
    insert_raw(pool, 3, "INV-C", "paid", 20.0, noon_millis("2025-03-02")).await;
    // Outside the range
    insert_raw(pool, 4, "INV-D", "paid", 99.0, noon_millis("2025-04-01")).await;
    // Not paid: never counted
    insert_raw(pool, 5, "INV-E", "pending", 50.0, noon_millis("2025-03-01")).await;
    insert_raw(pool, 6, "INV-F", "cancelled", 60.0, noon_millis("2025-03-02")).await;

    let (status, body) = app
        .get("/api/invoices/revenue?start_date=2025-03-01&end_date=2025-03-31")
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_revenue"], json!(45.0));
    assert_eq!(data["invoice_count"], json!(3));
    assert_eq!(data["daily"][0]["date"], json!("2025-03-01"));
    assert_eq!(data["daily"][0]["revenue"], json!(25.0));
    assert_eq!(data["daily"][0]["invoice_count"], json!(2));
    assert_eq!(data["daily"][1]["date"], json!("2025-03-02"));
    assert_eq!(data["daily"][1]["revenue"], json!(20.0));
}

#[tokio::test]
async fn revenue_rejects_inverted_range() {
    let app = spawn().await;

    let (status, body) = app
        .get("/api/invoices/revenue?start_date=2025-03-31&end_date=2025-03-01")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).contains("end_date"));
}

#[tokio::test]
async fn statistics_aggregate_counts_and_sums() {
    let app = spawn().await;
    let pool = &app.state.db.pool;

    insert_raw(pool, 1, "INV-A", "paid", 10.0, noon_millis("2025-03-01")).await;
    insert_raw(pool, 2, "INV-B", "paid", 20.0, noon_millis("2025-03-02")).await;
    insert_raw(pool, 3, "INV-C", "pending", 5.0, noon_millis("2025-03-03")).await;
    insert_raw(pool, 4, "INV-D", "cancelled", 7.0, noon_millis("2025-03-04")).await;

    let (status, body) = app.get("/api/invoices/statistics").await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_invoices"], json!(4));
    assert_eq!(data["pending_invoices"], json!(1));
    assert_eq!(data["paid_invoices"], json!(2));
    assert_eq!(data["cancelled_invoices"], json!(1));
    assert_eq!(data["total_revenue"], json!(30.0));
    assert_eq!(data["pending_amount"], json!(5.0));
}

#[tokio::test]
async fn statistics_on_empty_database_are_zero() {
    let app = spawn().await;

    let (status, body) = app.get("/api/invoices/statistics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_invoices"], json!(0));
    assert_eq!(body["data"]["total_revenue"], json!(0.0));
}
