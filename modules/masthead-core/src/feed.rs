use std::collections::HashSet;

use async_trait::async_trait;
use wordpress_client::{RemotePost, WordPressClient, WordPressError};

use crate::display::DisplayPost;
use crate::error::{MastheadError, Result};

/// One page of results from a post source. `OutOfRange` is the source's
/// terminal signal for exhausted pagination, not a failure.
#[derive(Debug)]
pub enum FeedPage {
    Posts(Vec<RemotePost>),
    OutOfRange,
}

/// Seam between the feed engine and the content source, mocked in tests.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn posts_page(&self, category_id: u32, page: u32, per_page: u32) -> Result<FeedPage>;
}

#[async_trait]
impl PostSource for WordPressClient {
    async fn posts_page(&self, category_id: u32, page: u32, per_page: u32) -> Result<FeedPage> {
        match self.list_posts(category_id, page, per_page).await {
            Ok(posts) => Ok(FeedPage::Posts(posts)),
            Err(WordPressError::PageOutOfRange) => Ok(FeedPage::OutOfRange),
            Err(e) => Err(MastheadError::Source(e.to_string())),
        }
    }
}

/// An incrementally-loaded, deduplicated, date-descending feed for one
/// category. Every section parameterizes this one implementation through
/// `{category_id, per_page}`.
///
/// Lifecycle: fresh feeds start before page 1 with `has_more = true`;
/// `load_next` advances one page at a time until a short page or an
/// out-of-range response ends pagination. A failed load leaves items and the
/// page cursor untouched, so retrying re-requests the same page.
#[derive(Debug)]
pub struct Feed {
    category_id: u32,
    per_page: u32,
    items: Vec<DisplayPost>,
    page: u32,
    has_more: bool,
    last_error: Option<String>,
}

impl Feed {
    pub fn new(category_id: u32, per_page: u32) -> Self {
        Self {
            category_id,
            per_page,
            items: Vec::new(),
            page: 0,
            has_more: true,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[DisplayPost] {
        &self.items
    }

    /// Pages loaded so far.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Message from the most recent failed load, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch and merge the next page. Returns the number of items appended.
    ///
    /// Items whose `href` is already present are dropped, so re-fetching a
    /// page never duplicates entries. A page shorter than `per_page` (or an
    /// out-of-range response) clears `has_more`.
    pub async fn load_next<S: PostSource + ?Sized>(&mut self, source: &S) -> Result<usize> {
        if !self.has_more {
            return Ok(0);
        }

        let next = self.page + 1;
        let page = match source
            .posts_page(self.category_id, next, self.per_page)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    category_id = self.category_id,
                    page = next,
                    error = %e,
                    "Feed page load failed"
                );
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let posts = match page {
            FeedPage::OutOfRange => {
                self.has_more = false;
                self.page = next;
                self.last_error = None;
                return Ok(0);
            }
            FeedPage::Posts(posts) => posts,
        };

        self.has_more = posts.len() as u32 == self.per_page;
        self.page = next;
        self.last_error = None;

        let mut seen: HashSet<String> = self.items.iter().map(|i| i.href.clone()).collect();
        let mut appended = 0;
        for post in &posts {
            let display = DisplayPost::from_remote(post);
            if !seen.insert(display.href.clone()) {
                continue;
            }
            self.items.push(display);
            appended += 1;
        }

        tracing::debug!(
            category_id = self.category_id,
            page = next,
            appended,
            total = self.items.len(),
            has_more = self.has_more,
            "Feed page merged"
        );
        Ok(appended)
    }

    /// Drop all loaded state, as when the owning view switches category.
    pub fn reset(&mut self) {
        self.items.clear();
        self.page = 0;
        self.has_more = true;
        self.last_error = None;
    }
}
