//! Admin Proxy - Shopify Admin API gateway for the storefront frontend.
//!
//! This binary serves a single CORS-gated route (`/api/proxy`) that forwards
//! product lookups and GraphQL documents to the Shopify Admin API.
//!
//! # Security
//!
//! This binary holds the Shopify Admin API access token. The token:
//! - Is read once at startup and kept in a `SecretString`
//! - Is only ever sent to Shopify, in the `X-Shopify-Access-Token` header
//! - Never appears in responses or logs
//!
//! Callers are NOT authenticated; the CORS allow-list only stops other
//! browser origins from reading responses.

#![cfg_attr(not(test), forbid(unsafe_code))]

use admin_proxy::config::ProxyConfig;
use admin_proxy::routes;
use admin_proxy::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ProxyConfig) -> Option<sentry::ClientInitGuard> {
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

#[tokio::main]
async fn main() {
    // Missing or malformed store configuration stops the process here
    let config = ProxyConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "admin_proxy=info,tower_http=debug".into());

    // Use JSON format on Fly.io for structured log parsing, text format locally
    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    tracing::info!(
        store = config.shopify.store(),
        api_version = %config.shopify.api_version,
        "Shopify Admin API configured"
    );

    let addr = config.socket_addr();
    let state = AppState::new(config).expect("Failed to initialize application state");

    let app = routes::app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    tracing::info!("admin proxy listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
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
