use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::AppState;

#[derive(Deserialize)]
pub struct ContactRequest {
    email: String,
    message: String,
}

pub const RATE_LIMIT_PER_HOUR: usize = 10;
const MAX_MESSAGE_CHARS: usize = 10_000;

/// Check rate limit for an IP. Returns true if the request is allowed, false if rate-limited.
/// Prunes expired entries and records the new request if allowed.
pub fn check_rate_limit(entries: &mut Vec<Instant>, now: Instant, max_per_hour: usize) -> bool {
    let cutoff = now - std::time::Duration::from_secs(3600);
    entries.retain(|t| *t > cutoff);
    if entries.len() >= max_per_hour {
        return false;
    }
    entries.push(now);
    true
}

/// Drop IPs whose request history has fully expired, so the limiter map does
/// not grow without bound across distinct client IPs.
pub fn prune_empty_entries(limiter: &mut std::collections::HashMap<std::net::IpAddr, Vec<Instant>>) {
    let cutoff = Instant::now() - std::time::Duration::from_secs(3600);
    limiter.retain(|_, entries| {
        entries.retain(|t| *t > cutoff);
        !entries.is_empty()
    });
}

pub fn validate_contact(email: &str, message: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        return Err("email is required");
    }
    if message.trim().is_empty() {
        return Err("message is required");
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err("message too long");
    }
    Ok(())
}

/// `POST /api/contact` — relay a contact-form message. Blank fields are a
/// 400; delivery goes to the configured webhook, or the log when none is set.
pub async fn api_contact(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    Json(body): Json<ContactRequest>,
) -> impl IntoResponse {
    if let Err(msg) = validate_contact(&body.email, &body.message) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": msg})),
        )
            .into_response();
    }

    {
        let mut limiter = state.rate_limiter.lock().await;
        // Periodically prune empty entries to prevent unbounded HashMap growth
        if limiter.len() > 1000 {
            prune_empty_entries(&mut limiter);
        }
        let entries = limiter.entry(addr.ip()).or_default();
        if !check_rate_limit(entries, Instant::now(), RATE_LIMIT_PER_HOUR) {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({"error": "Rate limit exceeded — max 10 messages per hour"})),
            )
                .into_response();
        }
    }

    let email = body.email.trim();
    let message = body.message.trim();

    match &state.contact_webhook_url {
        Some(url) => {
            let payload = serde_json::json!({"email": email, "message": message});
            let delivered = match state.http.post(url).json(&payload).send().await {
                Ok(resp) if resp.status().is_success() => true,
                Ok(resp) => {
                    warn!(status = resp.status().as_u16(), "Contact webhook rejected message");
                    false
                }
                Err(e) => {
                    warn!(error = %e, "Contact webhook unreachable");
                    false
                }
            };
            if !delivered {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "failed to deliver message"})),
                )
                    .into_response();
            }
        }
        None => {
            info!(email, "Contact message received (no webhook configured)");
        }
    }

    Json(serde_json::json!({"ok": true})).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_email() {
        assert_eq!(validate_contact("   ", "hello"), Err("email is required"));
    }

    #[test]
    fn rejects_blank_message() {
        assert_eq!(validate_contact("a@b.c", "\n\t"), Err("message is required"));
    }

    #[test]
    fn rejects_oversized_message() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(validate_contact("a@b.c", &long), Err("message too long"));
    }

    #[test]
    fn accepts_ordinary_message() {
        assert!(validate_contact("a@b.c", "hello there").is_ok());
    }

    #[test]
    fn rate_limit_allows_under_limit() {
        let mut entries = Vec::new();
        let now = Instant::now();
        for _ in 0..9 {
            assert!(check_rate_limit(&mut entries, now, 10));
        }
        assert_eq!(entries.len(), 9);
    }

    #[test]
    fn rate_limit_rejects_over_limit() {
        let mut entries = Vec::new();
        let now = Instant::now();
        for _ in 0..10 {
            assert!(check_rate_limit(&mut entries, now, 10));
        }
        assert!(!check_rate_limit(&mut entries, now, 10));
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn prune_drops_fully_expired_ips() {
        let mut limiter = std::collections::HashMap::new();
        let old = Instant::now() - std::time::Duration::from_secs(3601);
        let stale_ip: std::net::IpAddr = "10.0.0.1".parse().unwrap();
        let active_ip: std::net::IpAddr = "10.0.0.2".parse().unwrap();
        limiter.insert(stale_ip, vec![old, old]);
        limiter.insert(active_ip, vec![old, Instant::now()]);

        prune_empty_entries(&mut limiter);

        assert!(!limiter.contains_key(&stale_ip));
        // Active IP stays, with only its live timestamp kept.
        assert_eq!(limiter.get(&active_ip).map(Vec::len), Some(1));
    }

    #[test]
    fn prune_drops_empty_vecs() {
        let mut limiter = std::collections::HashMap::new();
        let ip: std::net::IpAddr = "10.0.0.3".parse().unwrap();
        limiter.insert(ip, Vec::new());
        prune_empty_entries(&mut limiter);
        assert!(limiter.is_empty());
    }

    #[test]
    fn rate_limit_expires_old_entries() {
        let mut entries = Vec::new();
        let old = Instant::now() - std::time::Duration::from_secs(3601);
        for _ in 0..10 {
            entries.push(old);
        }
        let now = Instant::now();
        assert!(check_rate_limit(&mut entries, now, 10));
        assert_eq!(entries.len(), 1);
    }
}
