use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the WordPress site, e.g. `https://cms.example.com`.
    pub wordpress_base_url: String,

    // Web server
    pub server_host: String,
    pub server_port: u16,

    /// Where contact-form messages are forwarded. When unset, messages are
    /// logged instead of relayed.
    pub contact_webhook_url: Option<String>,

    // Feed tuning
    pub feed_page_size: u32,
    pub feed_cache_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            wordpress_base_url: required_env("WORDPRESS_BASE_URL"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            contact_webhook_url: env::var("CONTACT_WEBHOOK_URL").ok(),
            feed_page_size: env::var("FEED_PAGE_SIZE")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .expect("FEED_PAGE_SIZE must be a number"),
            feed_cache_ttl_secs: env::var("FEED_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("FEED_CACHE_TTL_SECS must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
