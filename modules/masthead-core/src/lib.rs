pub mod categories;
pub mod config;
pub mod display;
pub mod error;
pub mod feed;
pub mod text;

pub use categories::Category;
pub use config::Config;
pub use display::{DisplayEssay, DisplayPost};
pub use error::{MastheadError, Result};
pub use feed::{Feed, FeedPage, PostSource};
