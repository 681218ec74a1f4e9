pub mod error;
pub mod types;

pub use error::{Result, WordPressError};
pub use types::{Embedded, FeaturedMedia, ProxiedResponse, RemotePost, Rendered, Term};

use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct WordPressClient {
    client: reqwest::Client,
    base_url: String,
}

impl WordPressClient {
    /// Create a client for a WordPress site. `base_url` is the site root,
    /// with or without a trailing slash.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn posts_url(&self, category_id: u32, page: u32, per_page: u32) -> String {
        format!(
            "{}/wp-json/wp/v2/posts?_embed&status=publish&categories={}&per_page={}&page={}&orderby=date&order=desc",
            self.base_url, category_id, per_page, page
        )
    }

    fn slug_url(&self, slug: &str) -> String {
        format!("{}/wp-json/wp/v2/posts?_embed&slug={}", self.base_url, slug)
    }

    /// Fetch one page of published posts in a category, newest first, with
    /// media and terms embedded. A 400 response is the API's signal that the
    /// page is past the end of the result set and maps to
    /// `WordPressError::PageOutOfRange`.
    pub async fn list_posts(
        &self,
        category_id: u32,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RemotePost>> {
        let url = self.posts_url(category_id, page, per_page);
        tracing::debug!(category_id, page, per_page, "Fetching posts page");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status.as_u16() == 400 {
                tracing::debug!(category_id, page, "Page beyond available range");
            } else {
                tracing::warn!(status = status.as_u16(), "Posts request failed");
            }
            return Err(decode_error_status(status.as_u16(), body));
        }

        let body = resp.text().await?;
        Ok(parse_posts_body(&body))
    }

    /// Look up a single post by slug. An empty result array means no post
    /// carries that slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<RemotePost>> {
        let url = self.slug_url(slug);
        tracing::debug!(slug, "Fetching post by slug");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), slug, "Slug lookup failed");
            return Err(WordPressError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(parse_posts_body(&body).into_iter().next())
    }

    /// Forward an arbitrary path (with query) under the site root and return
    /// the raw response. Upstream status and content-type pass through; only
    /// transport failures surface as errors.
    pub async fn forward(&self, path_and_query: &str) -> Result<ProxiedResponse> {
        let url = format!(
            "{}/{}",
            self.base_url,
            path_and_query.trim_start_matches('/')
        );
        tracing::debug!(url, "Forwarding request to content source");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = resp.bytes().await?.to_vec();

        Ok(ProxiedResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Map a non-success posts response to an error. 400 is the API's documented
/// signal for a page past the end of the result set, not a generic failure.
fn decode_error_status(status: u16, body: String) -> WordPressError {
    if status == 400 {
        WordPressError::PageOutOfRange
    } else {
        WordPressError::Api {
            status,
            message: body,
        }
    }
}

/// Parse a posts response body leniently: a non-array body is zero results,
/// and an array element that fails to deserialize is skipped rather than
/// failing the whole page.
fn parse_posts_body(body: &str) -> Vec<RemotePost> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Posts response is not valid JSON");
            return Vec::new();
        }
    };

    let Some(items) = value.as_array() else {
        tracing::warn!("Posts response is not an array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed post");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_posts_url() {
        let client = WordPressClient::new("https://cms.example.com/").unwrap();
        assert_eq!(
            client.posts_url(17, 2, 12),
            "https://cms.example.com/wp-json/wp/v2/posts?_embed&status=publish&categories=17&per_page=12&page=2&orderby=date&order=desc"
        );
    }

    #[test]
    fn builds_slug_url() {
        let client = WordPressClient::new("https://cms.example.com").unwrap();
        assert_eq!(
            client.slug_url("on-writing"),
            "https://cms.example.com/wp-json/wp/v2/posts?_embed&slug=on-writing"
        );
    }

    #[test]
    fn status_400_decodes_as_page_out_of_range() {
        let err = decode_error_status(
            400,
            r#"{"code": "rest_post_invalid_page_number"}"#.to_string(),
        );
        assert!(matches!(err, WordPressError::PageOutOfRange));
    }

    #[test]
    fn other_error_statuses_decode_as_api_errors() {
        match decode_error_status(503, "maintenance".to_string()) {
            WordPressError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parses_posts_array() {
        let posts = parse_posts_body(r#"[{"id": 1, "slug": "a"}, {"id": 2, "slug": "b"}]"#);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].slug, "b");
    }

    #[test]
    fn non_array_body_is_zero_results() {
        assert!(parse_posts_body(r#"{"code": "rest_invalid"}"#).is_empty());
        assert!(parse_posts_body("not json at all").is_empty());
    }

    #[test]
    fn skips_malformed_elements() {
        let posts = parse_posts_body(r#"[{"id": 1}, "just a string", {"id": 3}]"#);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].id, 3);
    }
}
