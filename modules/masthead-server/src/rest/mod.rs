pub mod contact;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use masthead_core::{categories, DisplayEssay};

use crate::AppState;

/// Cap on how many upstream pages one request may pull through the feed.
const MAX_PAGES_PER_REQUEST: u32 = 10;

#[derive(Deserialize)]
pub struct FeedQuery {
    pages: Option<u32>,
}

/// `GET /api/feed/{section}?pages=n` — the merged, deduplicated feed for a
/// section, loaded through that section's cached `Feed` up to `n` pages.
pub async fn api_feed(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
    Query(params): Query<FeedQuery>,
) -> impl IntoResponse {
    let Some(category) = categories::by_slug(&section) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "unknown section"})),
        )
            .into_response();
    };
    if !category.is_configured() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "section not configured"})),
        )
            .into_response();
    }

    let pages = params.pages.unwrap_or(1).clamp(1, MAX_PAGES_PER_REQUEST);

    let entry = state
        .feeds
        .entry(category.slug, category.id, state.feed_page_size)
        .await;
    let mut entry = entry.lock().await;
    entry.ensure_fresh(state.feeds.ttl());

    while entry.feed.page() < pages && entry.feed.has_more() {
        if let Err(e) = entry.feed.load_next(&state.client).await {
            warn!(section = category.slug, error = %e, "Feed page load failed");
            if entry.feed.items().is_empty() {
                return (
                    StatusCode::BAD_GATEWAY,
                    Json(serde_json::json!({"error": "content source unavailable"})),
                )
                    .into_response();
            }
            // Keep serving what already loaded; the client can retry.
            break;
        }
    }

    Json(serde_json::json!({
        "section": category.slug,
        "items": entry.feed.items(),
        "has_more": entry.feed.has_more(),
    }))
    .into_response()
}

/// `GET /api/essays/{slug}` — one essay, display-ready.
pub async fn api_essay(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.client.get_post_by_slug(&slug).await {
        Ok(Some(post)) => Json(DisplayEssay::from_remote(&post)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "essay not found"})),
        )
            .into_response(),
        Err(e) => {
            warn!(slug, error = %e, "Essay lookup failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": "content source unavailable"})),
            )
                .into_response()
        }
    }
}
