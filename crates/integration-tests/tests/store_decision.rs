//! Store decision endpoint, end to end through the full middleware stack.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;
use store_decision_core::StoreId;
use store_decision_integration_tests::{BARREIRO_CEP, SION_CEP, TestApp, UNZONED_CEP};
use store_decision_server::middleware::REQUEST_ID_HEADER;

const ENDPOINT: &str = "/wp-json/custom/v1/store-decision";

// 2026-10-20 is a Tuesday; the weekday cutoff is 18:45.

#[tokio::test]
async fn test_same_day_order_after_cutoff_is_routed_to_central() {
    let app = TestApp::at("2026-10-20 19:00");
    let response = app
        .post_json(ENDPOINT, &json!({ "cep": BARREIRO_CEP }), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["store_final"], StoreId::Barreiro.name());
    assert_eq!(response.body["effective_store_final"], StoreId::Central.name());
    assert_eq!(response.body["pickup_store_id"], "110727");
    assert_eq!(
        response.body["payment_accounts"],
        json!({ "stripe": "stripe", "pagarme": "central" })
    );
    assert_eq!(response.body["payment_methods"].as_array().unwrap().len(), 7);
    assert!(response.session_cookie().is_some());
    assert!(response.headers.contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_future_order_after_cutoff_keeps_its_store() {
    let app = TestApp::at("2026-10-20 19:00");
    let response = app
        .post_json(
            ENDPOINT,
            &json!({ "cep": BARREIRO_CEP, "delivery_date": "21/10/2026" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["effective_store_final"], StoreId::Barreiro.name());
    assert_eq!(
        response.body["payment_accounts"],
        json!({ "stripe": "stripe_cc", "pagarme": "barreiro" })
    );
}

#[tokio::test]
async fn test_morning_delivery_goes_to_zone_store() {
    let app = TestApp::at("2026-10-20 10:00");
    let response = app
        .post_json("/api/store-decision", &json!({ "cep": SION_CEP }), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["store_final"], StoreId::Sion.name());
    assert_eq!(response.body["effective_store_final"], StoreId::Sion.name());
    assert_eq!(response.body["pickup_store_id"], "127163");
}

#[tokio::test]
async fn test_unzoned_cep_goes_to_central() {
    let app = TestApp::at("2026-10-20 10:00");
    let response = app
        .post_json(ENDPOINT, &json!({ "cep": UNZONED_CEP }), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["store_final"], StoreId::Central.name());
    assert_eq!(response.body["pickup_store_id"], "86261");
}

#[tokio::test]
async fn test_missing_cep_is_rejected() {
    let app = TestApp::at("2026-10-20 10:00");

    for body in [json!({}), json!({ "cep": "" }), json!({ "cep": "--" })] {
        let response = app.post_json(ENDPOINT, &body, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["code"], "no_cep");
        assert_eq!(response.body["data"]["status"], 400);
    }
}

#[tokio::test]
async fn test_unknown_pickup_store_answers_the_fallback() {
    let app = TestApp::at("2026-10-20 10:00");
    let response = app
        .post_json(
            ENDPOINT,
            &json!({
                "cep": BARREIRO_CEP,
                "shipping_method": "pickup",
                "pickup_store": "Unidade Savassi",
            }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["store_final"], StoreId::Central.name());
    assert_eq!(response.body["effective_store_final"], StoreId::Central.name());
    assert_eq!(
        response.body["payment_accounts"],
        json!({ "stripe": "stripe", "pagarme": "central" })
    );
}

#[tokio::test]
async fn test_pickup_store_is_honored() {
    let app = TestApp::at("2026-10-20 10:00");
    let response = app
        .post_json(
            ENDPOINT,
            &json!({
                "cep": BARREIRO_CEP,
                "shipping_method": "pickup",
                "pickup_store": "Unidade Sion",
            }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["store_final"], StoreId::Sion.name());
    assert_eq!(response.body["pickup_store_id"], "127163");
}

#[tokio::test]
async fn test_without_session_layer_is_a_dependency_failure() {
    let app = TestApp::without_sessions("2026-10-20 10:00");
    let response = app
        .post_json(ENDPOINT, &json!({ "cep": BARREIRO_CEP }), None)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["code"], "dependency_unavailable");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::at("2026-10-20 10:00");
    let response = app
        .send(
            axum::http::Request::post(ENDPOINT)
                .header("content-type", "application/json")
                .header(REQUEST_ID_HEADER, "checkout-42")
                .body(axum::body::Body::from(json!({ "cep": SION_CEP }).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(response.headers[REQUEST_ID_HEADER], "checkout-42");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::at("2026-10-20 10:00");
    assert_eq!(app.get("/health", None).await.status, StatusCode::OK);
    assert_eq!(app.get("/health/ready", None).await.status, StatusCode::OK);
}

mod unreachable_sessions {
    use async_trait::async_trait;
    use tower_sessions::session::{Id, Record};
    use tower_sessions::session_store::{self, SessionStore};

    /// Session backend that is down.
    #[derive(Debug, Clone, Default)]
    pub struct UnreachableStore;

    fn down<T>() -> session_store::Result<T> {
        Err(session_store::Error::Backend("connection refused".to_string()))
    }

    #[async_trait]
    impl SessionStore for UnreachableStore {
        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            down()
        }

        async fn load(&self, _session_id: &Id) -> session_store::Result<Option<Record>> {
            down()
        }

        async fn delete(&self, _session_id: &Id) -> session_store::Result<()> {
            down()
        }
    }
}

#[tokio::test]
async fn test_failing_session_store_answers_the_fallback() {
    use store_decision_server::middleware::SESSION_COOKIE_NAME;
    use tower_sessions::session::Id;

    let app = TestApp::with_session_store(
        "2026-10-20 10:00",
        unreachable_sessions::UnreachableStore,
    );
    let cookie = format!("{SESSION_COOKIE_NAME}={}", Id::default());

    let response = app
        .post_json(ENDPOINT, &json!({ "cep": BARREIRO_CEP }), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["store_final"], StoreId::Central.name());
    assert_eq!(response.body["effective_store_final"], StoreId::Central.name());
    assert_eq!(response.body["pickup_store_id"], "86261");
    assert_eq!(
        response.body["payment_accounts"],
        json!({ "stripe": "stripe", "pagarme": "central" })
    );
    assert_eq!(response.body["payment_methods"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_failing_session_store_without_cookie_answers_the_fallback() {
    let app = TestApp::with_session_store(
        "2026-10-20 10:00",
        unreachable_sessions::UnreachableStore,
    );

    let response = app
        .post_json(ENDPOINT, &json!({ "cep": BARREIRO_CEP }), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["store_final"], StoreId::Central.name());
    assert_eq!(response.body["effective_store_final"], StoreId::Central.name());
    assert_eq!(
        response.body["payment_accounts"],
        json!({ "stripe": "stripe", "pagarme": "central" })
    );
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_failing_session_store_keeps_gateways_available() {
    let app = TestApp::with_session_store(
        "2026-10-20 10:00",
        unreachable_sessions::UnreachableStore,
    );

    let response = app
        .post_json(
            "/api/checkout/gateways",
            &json!({
                "gateways": ["stripe", "stripe_cc", "pagarme_custom_pix"],
                "billing_postcode": BARREIRO_CEP,
            }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["effective_store_final"], StoreId::Barreiro.name());
    assert_eq!(
        response.body["gateways"],
        json!(["stripe_cc", "pagarme_custom_pix"])
    );
}
