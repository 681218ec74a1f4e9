use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use crate::AppState;

/// `GET /api/proxy/{*path}` — same-origin passthrough to the content source,
/// so browsers avoid cross-origin fetches. Upstream status and content-type
/// pass through; transport failures become a structured 502. Only the REST
/// API surface (`wp-json/...`) is forwardable.
pub async fn api_proxy(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let path = path.trim_start_matches('/');
    if path != "wp-json" && !path.starts_with("wp-json/") {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "unsupported proxy path"})),
        )
            .into_response();
    }

    let path_and_query = match query {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    };

    match state.client.forward(&path_and_query).await {
        Ok(upstream) => {
            let status =
                StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut builder = Response::builder().status(status);
            if let Some(content_type) = upstream.content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            match builder.body(Body::from(upstream.body)) {
                Ok(response) => response,
                Err(_) => StatusCode::BAD_GATEWAY.into_response(),
            }
        }
        Err(e) => {
            warn!(path = path_and_query, error = %e, "Proxy fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": "upstream unreachable"})),
            )
                .into_response()
        }
    }
}
