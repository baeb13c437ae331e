//! Store decision service binary.
//!
//! # Architecture
//!
//! - Axum web framework, JSON and form endpoints called by the commerce runtime
//! - Zone matching from a local postcode table or a remote service
//! - `tower-sessions` for checkout state (`PostgreSQL` or in-memory)
//! - `PostgreSQL` for order routing metadata when a database is configured

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{Router, ServiceExt, extract::Request};
use sentry::integrations::tracing as sentry_tracing;
use store_decision_core::PaymentRules;
use store_decision_server::{
    app::build_router,
    config::{StoreDecisionConfig, ZoneSource},
    db::{self, PgOrderMetadataStore},
    decision::{DecisionEngine, SystemClock},
    middleware::create_session_layer,
    orders::{MemoryOrderMetadataStore, OrderMetadataStore},
    state::AppState,
    zones::{HttpZoneMatcher, NoZoneMatcher, PostcodeZoneTable, ZoneMatcher},
};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StoreDecisionConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Build the zone matcher for the configured source.
fn zone_matcher(source: &ZoneSource) -> Arc<dyn ZoneMatcher> {
    match source {
        ZoneSource::Table(path) => {
            let table = PostcodeZoneTable::from_path(path).expect("Failed to load zone table");
            tracing::info!(path = %path.display(), zones = table.len(), "Zone table loaded");
            Arc::new(table)
        }
        ZoneSource::Service(service) => {
            tracing::info!(url = %service.url, "Using remote zone service");
            Arc::new(HttpZoneMatcher::new(service).expect("Failed to create zone client"))
        }
        ZoneSource::None => {
            tracing::warn!("No zone source configured, every delivery resolves to Central");
            Arc::new(NoZoneMatcher)
        }
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StoreDecisionConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "store_decision_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let engine = DecisionEngine::new(
        zone_matcher(&config.zones),
        Arc::new(SystemClock::new(config.store_offset)),
    )
    .with_payment_rules(PaymentRules::with_weekday_restriction(
        config.payment_weekday_restriction,
    ))
    .with_zone_timeout(config.zone_lookup_timeout);

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p store-decision-cli -- migrate
    let app = if let Some(database_url) = &config.database_url {
        let pool = db::create_pool(database_url)
            .await
            .expect("Failed to create database pool");
        tracing::info!("Database pool created");

        let orders: Arc<dyn OrderMetadataStore> = Arc::new(PgOrderMetadataStore::new(pool.clone()));
        let session_layer =
            create_session_layer(PostgresStore::new(pool.clone()), config.is_secure());
        build_router(AppState::new(engine, orders, Some(pool)), session_layer)
    } else {
        tracing::warn!("No database configured, sessions and order metadata are in memory");

        let orders: Arc<dyn OrderMetadataStore> = Arc::new(MemoryOrderMetadataStore::new());
        let session_layer = create_session_layer(MemoryStore::default(), config.is_secure());
        build_router(AppState::new(engine, orders, None), session_layer)
    };

    serve(&config, app).await;
}

async fn serve(config: &StoreDecisionConfig, app: Router) {
    // Trailing slashes must be trimmed before routing
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);

    let addr = config.socket_addr();
    tracing::info!("store decision service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
