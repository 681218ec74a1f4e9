use std::collections::HashMap;

use serde::Deserialize;

/// A rendered field as WordPress returns it (`{"rendered": "..."}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// A taxonomy term (category or tag) from the `wp:term` embed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// One size entry under `media_details.sizes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaSize {
    #[serde(default)]
    pub source_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub sizes: HashMap<String, MediaSize>,
}

/// Featured-image metadata from the `wp:featuredmedia` embed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedMedia {
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub media_details: MediaDetails,
}

impl FeaturedMedia {
    /// Best display URL for a feed card: prefer the `large` size, then
    /// `medium_large`, then the original upload.
    pub fn best_size(&self) -> Option<&str> {
        for name in ["large", "medium_large"] {
            if let Some(size) = self.media_details.sizes.get(name) {
                if !size.source_url.is_empty() {
                    return Some(&size.source_url);
                }
            }
        }
        if self.source_url.is_empty() {
            None
        } else {
            Some(&self.source_url)
        }
    }
}

/// The `_embedded` object attached when `_embed` is requested.
/// `wp:term` is a list of taxonomy groups; group 0 holds categories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<FeaturedMedia>,
    #[serde(rename = "wp:term", default)]
    pub terms: Vec<Vec<Term>>,
}

/// A post as the WordPress REST API returns it. Every field defaults so a
/// sparse or partially malformed post still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotePost {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    /// Naive ISO 8601 in the site's timezone, e.g. `2026-01-29T10:15:00`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub content: Option<Rendered>,
    #[serde(rename = "_embedded", default)]
    pub embedded: Embedded,
}

impl RemotePost {
    /// First embedded featured-media entry, if any.
    pub fn featured_media(&self) -> Option<&FeaturedMedia> {
        self.embedded.featured_media.first()
    }

    /// First category term from the embedded taxonomy groups.
    pub fn primary_category(&self) -> Option<&Term> {
        self.embedded.terms.first().and_then(|group| group.first())
    }
}

/// A raw upstream response relayed by the proxy endpoint: status and
/// content-type pass through untouched.
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_with_sizes(sizes: &[(&str, &str)], source_url: &str) -> FeaturedMedia {
        FeaturedMedia {
            source_url: source_url.to_string(),
            alt_text: String::new(),
            media_details: MediaDetails {
                sizes: sizes
                    .iter()
                    .map(|(name, url)| {
                        (
                            name.to_string(),
                            MediaSize {
                                source_url: url.to_string(),
                            },
                        )
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn best_size_prefers_large() {
        let media = media_with_sizes(
            &[
                ("large", "https://cdn/large.jpg"),
                ("medium_large", "https://cdn/ml.jpg"),
            ],
            "https://cdn/full.jpg",
        );
        assert_eq!(media.best_size(), Some("https://cdn/large.jpg"));
    }

    #[test]
    fn best_size_falls_back_to_medium_large_then_source() {
        let media = media_with_sizes(&[("medium_large", "https://cdn/ml.jpg")], "https://cdn/full.jpg");
        assert_eq!(media.best_size(), Some("https://cdn/ml.jpg"));

        let media = media_with_sizes(&[], "https://cdn/full.jpg");
        assert_eq!(media.best_size(), Some("https://cdn/full.jpg"));

        let media = media_with_sizes(&[], "");
        assert_eq!(media.best_size(), None);
    }

    #[test]
    fn deserializes_embedded_post() {
        let json = r#"{
            "id": 42,
            "slug": "on-writing",
            "date": "2026-01-29T10:15:00",
            "title": {"rendered": "On Writing"},
            "excerpt": {"rendered": "<p>Some words.</p>"},
            "_embedded": {
                "wp:featuredmedia": [{
                    "source_url": "https://cdn/full.jpg",
                    "alt_text": "A desk",
                    "media_details": {"sizes": {"large": {"source_url": "https://cdn/large.jpg"}}}
                }],
                "wp:term": [[{"id": 17, "name": "Culture", "slug": "culture"}]]
            }
        }"#;
        let post: RemotePost = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.featured_media().unwrap().best_size(), Some("https://cdn/large.jpg"));
        assert_eq!(post.primary_category().unwrap().name, "Culture");
    }

    #[test]
    fn tolerates_sparse_post() {
        let post: RemotePost = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(post.slug, "");
        assert!(post.title.rendered.is_empty());
        assert!(post.featured_media().is_none());
        assert!(post.primary_category().is_none());
    }
}
