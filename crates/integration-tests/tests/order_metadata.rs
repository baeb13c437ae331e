//! Order routing metadata recorded from the checkout session.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;
use store_decision_core::StoreId;
use store_decision_integration_tests::{BARREIRO_CEP, TestApp};

#[tokio::test]
async fn test_pickup_order_is_pinned_to_its_store() {
    let app = TestApp::at("2026-10-20 10:00");
    let decision = app
        .post_json(
            "/api/store-decision",
            &json!({
                "cep": BARREIRO_CEP,
                "shipping_method": "pickup",
                "pickup_store": "Unidade Sion",
            }),
            None,
        )
        .await;
    let cookie = decision.session_cookie().unwrap();

    let recorded = app
        .post_json(
            "/api/orders/1001/store-metadata",
            &json!({ "shipping_pickup_stores": "Unidade Sion" }),
            Some(&cookie),
        )
        .await;

    assert_eq!(recorded.status, StatusCode::CREATED);
    assert_eq!(recorded.body["order_id"], 1001);
    let meta = &recorded.body["meta"];
    assert_eq!(meta["_store_final"], StoreId::Sion.name());
    assert_eq!(meta["_effective_store_final"], StoreId::Sion.name());
    assert_eq!(meta["_is_future_date"], "no");
    assert_eq!(meta["_payment_account_stripe"], "eh_stripe_pay");
    assert_eq!(meta["_payment_account_pagarme"], "sion");
    assert_eq!(meta["_shipping_pickup_stores"], StoreId::Sion.name());
    assert_eq!(meta["_shipping_pickup_store_id"], "127163");

    let shown = app.get("/api/orders/1001/store-metadata", None).await;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.body, recorded.body);
}

#[tokio::test]
async fn test_delivery_order_records_the_session_decision_and_posted_pickup_store() {
    let app = TestApp::at("2026-10-20 19:00");
    let decision = app
        .post_json(
            "/api/store-decision",
            &json!({ "cep": BARREIRO_CEP }),
            None,
        )
        .await;
    let cookie = decision.session_cookie().unwrap();

    let recorded = app
        .post_json(
            "/api/orders/1002/store-metadata",
            &json!({ "shipping_pickup_stores": "Unidade Sion" }),
            Some(&cookie),
        )
        .await;

    assert_eq!(recorded.status, StatusCode::CREATED);
    let meta = &recorded.body["meta"];
    assert_eq!(meta["_store_final"], StoreId::Barreiro.name());
    assert_eq!(meta["_effective_store_final"], StoreId::Central.name());
    assert_eq!(meta["_payment_account_stripe"], "stripe");
    assert_eq!(meta["_shipping_pickup_stores"], StoreId::Sion.name());
    assert_eq!(meta["_shipping_pickup_store_id"], "110727");
}

#[tokio::test]
async fn test_delivery_order_without_pickup_store_has_no_pickup_meta() {
    let app = TestApp::at("2026-10-20 10:00");
    let decision = app
        .post_json(
            "/api/store-decision",
            &json!({ "cep": BARREIRO_CEP }),
            None,
        )
        .await;
    let cookie = decision.session_cookie().unwrap();

    let recorded = app
        .post_json(
            "/api/orders/1004/store-metadata",
            &json!({ "shipping_pickup_stores": "  " }),
            Some(&cookie),
        )
        .await;

    assert_eq!(recorded.status, StatusCode::CREATED);
    let meta = &recorded.body["meta"];
    assert_eq!(meta["_store_final"], StoreId::Barreiro.name());
    assert_eq!(meta["_effective_store_final"], StoreId::Barreiro.name());
    assert!(meta.get("_shipping_pickup_stores").is_none());
    assert!(meta.get("_shipping_pickup_store_id").is_none());
}

#[tokio::test]
async fn test_unknown_pickup_store_is_rejected() {
    let app = TestApp::at("2026-10-20 10:00");
    let decision = app
        .post_json(
            "/api/store-decision",
            &json!({ "cep": BARREIRO_CEP, "shipping_method": "pickup" }),
            None,
        )
        .await;
    let cookie = decision.session_cookie().unwrap();

    let recorded = app
        .post_json(
            "/api/orders/1003/store-metadata",
            &json!({ "shipping_pickup_stores": "Unidade Savassi" }),
            Some(&cookie),
        )
        .await;

    assert_eq!(recorded.status, StatusCode::BAD_REQUEST);
    assert_eq!(recorded.body["code"], "bad_request");
}

#[tokio::test]
async fn test_missing_order_metadata_is_not_found() {
    let app = TestApp::at("2026-10-20 10:00");
    let response = app.get("/api/orders/404/store-metadata", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["code"], "not_found");
}

#[tokio::test]
async fn test_order_without_decision_records_unassigned_accounts() {
    let app = TestApp::at("2026-10-20 10:00");

    let recorded = app
        .post_json("/api/orders/1005/store-metadata", &json!({}), None)
        .await;

    assert_eq!(recorded.status, StatusCode::CREATED);
    let meta = &recorded.body["meta"];
    assert_eq!(meta["_store_final"], StoreId::Central.name());
    assert_eq!(meta["_effective_store_final"], StoreId::Central.name());
    assert_eq!(meta["_is_future_date"], "no");
    assert_eq!(meta["_payment_account_stripe"], "central");
    assert_eq!(meta["_payment_account_pagarme"], "central");
}
