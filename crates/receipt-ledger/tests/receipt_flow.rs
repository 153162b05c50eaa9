use std::sync::Arc;
use std::thread;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use receipt_ledger::receipts::{
    receipt_router, scoring, Receipt, ReceiptDraft, ReceiptId, ReceiptStore, StoreError,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn receipt_payload(retailer: &str, total: &str) -> Value {
    json!({
        "retailer": retailer,
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
        ],
        "total": total,
    })
}

fn receipt_from(payload: Value) -> Receipt {
    let draft: ReceiptDraft = serde_json::from_value(payload).expect("draft deserializes");
    Receipt::from_draft(draft).expect("receipt validates")
}

async fn post_receipt(store: &Arc<ReceiptStore>, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds");

    let response = receipt_router(store.clone())
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get_points(store: &Arc<ReceiptStore>, id: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(format!("/receipts/{id}/points"))
        .body(Body::empty())
        .expect("request builds");

    let response = receipt_router(store.clone())
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn submit_then_lookup_round_trip() {
    let store = Arc::new(ReceiptStore::new());
    let payload = receipt_payload("Target", "35.35");
    let expected = scoring::total(&receipt_from(payload.clone()));

    let (status, body) = post_receipt(&store, &payload).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().expect("response carries id").to_string();

    let (status, body) = get_points(&store, &id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"].as_u64(), Some(expected));
    assert_eq!(expected, 20);
}

#[tokio::test]
async fn invalid_receipt_is_rejected_and_not_stored() {
    let store = Arc::new(ReceiptStore::new());
    let payload = receipt_payload("shop@home", "35.35");

    let (status, body) = post_receipt(&store, &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
    assert!(store.is_empty());
}

#[tokio::test]
async fn one_decimal_digit_total_is_rejected() {
    let store = Arc::new(ReceiptStore::new());
    let (status, _) = post_receipt(&store, &receipt_payload("Target", "3.5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_id_lookup_is_not_found() {
    let store = Arc::new(ReceiptStore::new());
    store.insert(receipt_from(receipt_payload("Target", "35.35")));

    let (status, body) = get_points(&store, "1fd1bd2c-5dbe-44b4-9a41-256a53dc0b5e").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["points"].is_null());
}

#[test]
fn concurrent_inserts_stay_independently_retrievable() {
    let store = Arc::new(ReceiptStore::new());
    let workers: u64 = 16;
    let per_worker: usize = 25;

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let store = store.clone();
            thread::spawn(move || {
                let mut submitted = Vec::with_capacity(per_worker);
                for n in 0..per_worker as u64 {
                    // Vary the total so scores differ across receipts.
                    let cents = 101 + worker * 100 + n;
                    let total = format!("{}.{:02}", cents / 100, cents % 100);
                    let receipt = receipt_from(receipt_payload("Target", &total));
                    let expected = scoring::total(&receipt);
                    let id = store.insert(receipt);
                    submitted.push((id, expected));
                }
                submitted
            })
        })
        .collect();

    let mut seen: Vec<(ReceiptId, u64)> = Vec::new();
    for handle in handles {
        seen.extend(handle.join().expect("worker completes"));
    }

    assert_eq!(seen.len(), workers as usize * per_worker);
    assert_eq!(store.len(), seen.len());

    let mut ids: Vec<&str> = seen.iter().map(|(id, _)| id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), seen.len(), "generated ids must be distinct");

    for (id, expected) in &seen {
        assert_eq!(store.points(id), Ok(*expected));
    }

    let unknown = ReceiptId("00000000-0000-0000-0000-000000000000".to_string());
    assert_eq!(
        store.points(&unknown),
        Err(StoreError::NotFound(unknown.clone()))
    );
}
