use serde::Serialize;
use wordpress_client::RemotePost;

use crate::text::{clean_rendered, format_date_label, truncate_excerpt, EXCERPT_MAX_CHARS};

/// Served when a post has no embedded featured media.
pub const FALLBACK_IMAGE: &str = "/images/placeholder.jpg";

/// Route prefix essays are published under.
pub const ESSAY_ROUTE_PREFIX: &str = "/essays";

/// The cleaned, display-ready projection of a remote post, as a feed card
/// shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPost {
    pub id: u64,
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub date_label: String,
    pub image: String,
    pub alt: String,
}

impl DisplayPost {
    /// Total mapping from a raw post: every field degrades to a safe
    /// placeholder rather than failing.
    pub fn from_remote(post: &RemotePost) -> Self {
        let title = {
            let cleaned = clean_rendered(&post.title.rendered);
            if cleaned.is_empty() {
                "Untitled".to_string()
            } else {
                cleaned
            }
        };

        let excerpt = truncate_excerpt(&clean_rendered(&post.excerpt.rendered), EXCERPT_MAX_CHARS);

        let (image, media_alt) = match post.featured_media() {
            Some(media) => (
                media
                    .best_size()
                    .unwrap_or(FALLBACK_IMAGE)
                    .to_string(),
                media.alt_text.trim().to_string(),
            ),
            None => (FALLBACK_IMAGE.to_string(), String::new()),
        };
        let alt = if media_alt.is_empty() {
            title.clone()
        } else {
            media_alt
        };

        Self {
            id: post.id,
            href: format!("{}/{}", ESSAY_ROUTE_PREFIX, post.slug),
            title,
            excerpt,
            date_label: format_date_label(&post.date),
            image,
            alt,
        }
    }
}

/// The full essay-page projection: the feed-card fields plus the rendered
/// body and the resolved section. Cleanup applies to title and excerpt only;
/// the body HTML passes through for the presentation layer to render.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayEssay {
    #[serde(flatten)]
    pub post: DisplayPost,
    pub content_html: String,
    pub category: Option<String>,
}

impl DisplayEssay {
    pub fn from_remote(post: &RemotePost) -> Self {
        Self {
            post: DisplayPost::from_remote(post),
            content_html: post
                .content
                .as_ref()
                .map(|c| c.rendered.clone())
                .unwrap_or_default(),
            category: post.primary_category().map(|t| t.name.clone()),
        }
    }
}
