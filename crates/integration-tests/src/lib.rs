//! Integration test support for the store decision service.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! a clock stopped at a known instant, a small postcode zone table and
//! in-memory sessions and order metadata.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p store-decision-integration-tests
//! ```

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::NaiveDateTime;
use serde_json::Value;
use store_decision_server::{
    app::build_router,
    decision::{DecisionEngine, FixedClock},
    middleware::{SESSION_COOKIE_NAME, create_session_layer},
    orders::MemoryOrderMetadataStore,
    state::AppState,
    zones::PostcodeZoneTable,
};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionStore};

/// CEP inside zone 24 (Barreiro).
pub const BARREIRO_CEP: &str = "30140-000";

/// CEP inside zone 114 (Sion).
pub const SION_CEP: &str = "30310-100";

/// CEP no zone covers.
pub const UNZONED_CEP: &str = "01310-100";

/// A response with its body parsed as JSON (`Null` when empty or not JSON).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` pair of the session cookie set by this response.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .map(str::to_owned)
    }
}

/// The service wired for tests.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Full middleware stack with the clock stopped at `at` (`YYYY-MM-DD HH:MM`,
    /// store-local).
    ///
    /// # Panics
    ///
    /// Panics if `at` is malformed.
    #[must_use]
    pub fn at(at: &str) -> Self {
        Self::with_session_store(at, MemoryStore::default())
    }

    /// Full middleware stack over a custom session store.
    ///
    /// # Panics
    ///
    /// Panics if `at` is malformed.
    #[must_use]
    pub fn with_session_store<S>(at: &str, store: S) -> Self
    where
        S: SessionStore + Clone,
    {
        let session_layer = create_session_layer(store, false);
        Self {
            router: build_router(test_state(at), session_layer),
        }
    }

    /// Routes only: no session layer, no request id, no tracing.
    ///
    /// # Panics
    ///
    /// Panics if `at` is malformed.
    #[must_use]
    pub fn without_sessions(at: &str) -> Self {
        Self {
            router: store_decision_server::routes::routes().with_state(test_state(at)),
        }
    }

    /// Send a request and collect the response.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// POST a JSON body, with an optional session cookie.
    pub async fn post_json(&self, uri: &str, body: &Value, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
    }

    /// POST a url-encoded form, with an optional session cookie.
    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder =
            Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(
            builder
                .body(Body::from(form.to_owned()))
                .expect("valid request"),
        )
        .await
    }

    /// GET, with an optional session cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("valid request"))
            .await
    }
}

fn test_state(at: &str) -> AppState {
    let now = NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M").expect("valid test instant");
    let zones = PostcodeZoneTable::new()
        .with_zone(24, &["30140*"])
        .and_then(|table| table.with_zone(114, &["30310000...30319999"]))
        .expect("valid zone rules");

    let engine = DecisionEngine::new(Arc::new(zones), Arc::new(FixedClock::new(now)));
    AppState::new(engine, Arc::new(MemoryOrderMetadataStore::new()), None)
}
