use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use masthead_core::Config;
use wordpress_client::WordPressClient;

mod feed_cache;
mod proxy;
mod rest;
mod telemetry;

use feed_cache::FeedCache;

pub struct AppState {
    pub client: WordPressClient,
    pub feeds: FeedCache,
    pub feed_page_size: u32,
    pub http: reqwest::Client,
    pub contact_webhook_url: Option<String>,
    pub rate_limiter: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let config = Config::from_env();

    let client = WordPressClient::new(&config.wordpress_base_url)?;

    let state = Arc::new(AppState {
        client,
        feeds: FeedCache::new(Duration::from_secs(config.feed_cache_ttl_secs)),
        feed_page_size: config.feed_page_size,
        http: reqwest::Client::new(),
        contact_webhook_url: config.contact_webhook_url,
        rate_limiter: Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Feed + essays
        .route("/api/feed/{section}", get(rest::api_feed))
        .route("/api/essays/{slug}", get(rest::api_essay))
        // Contact relay
        .route("/api/contact", post(rest::contact::api_contact))
        // Same-origin passthrough to the content source
        .route("/api/proxy/{*path}", get(proxy::api_proxy))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Feed responses are short-lived; let the in-process TTL cache decide
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only (no query params, no IP)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Masthead API starting on {addr}");
    info!(source = %config.wordpress_base_url, "Serving feeds from content source");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
