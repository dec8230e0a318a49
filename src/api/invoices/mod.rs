//! Invoice API 模块
//!
//! Static segments (`/statistics`, `/revenue`, `/number/…`, `/order/…`)
//! are registered alongside the `/{id}` capture; axum gives statics
//! precedence.

mod handler;

use axum::{Router, routing::get, routing::patch};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/invoices", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/statistics", get(handler::statistics))
        .route("/revenue", get(handler::revenue))
        .route("/number/{invoice_number}", get(handler::get_by_number))
        .route("/order/{order_id}", get(handler::get_by_order))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/paid", patch(handler::mark_as_paid))
        .route("/{id}/cancel", patch(handler::cancel))
}
