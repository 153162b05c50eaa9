use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{Receipt, ReceiptDraft};
use super::store::{ReceiptId, ReceiptStore, StoreError};

/// Router builder exposing the submit and lookup endpoints.
pub fn receipt_router(store: Arc<ReceiptStore>) -> Router {
    Router::new()
        .route("/receipts/process", post(process_handler))
        .route("/receipts/:receipt_id/points", get(points_handler))
        .with_state(store)
}

pub(crate) async fn process_handler(
    State(store): State<Arc<ReceiptStore>>,
    axum::Json(draft): axum::Json<ReceiptDraft>,
) -> Response {
    match Receipt::from_draft(draft) {
        Ok(receipt) => {
            let id = store.insert(receipt);
            (StatusCode::OK, axum::Json(json!({ "id": id }))).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn points_handler(
    State(store): State<Arc<ReceiptStore>>,
    Path(receipt_id): Path<String>,
) -> Response {
    let id = ReceiptId(receipt_id);
    match store.points(&id) {
        Ok(points) => (StatusCode::OK, axum::Json(json!({ "points": points }))).into_response(),
        Err(error @ StoreError::NotFound(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
