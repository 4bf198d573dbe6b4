// src/config.rs

use dotenvy::dotenv;
use std::env;
use url::Url;

/// Number of questions in an easy-level test.
pub const EASY_QUESTION_COUNT: usize = 10;
/// Number of questions in a medium-level test.
pub const MEDIUM_QUESTION_COUNT: usize = 15;
/// Number of questions in a hard-level test.
pub const HARD_QUESTION_COUNT: usize = 20;

/// Length of the code derived from a group id for joining.
pub const JOIN_CODE_LENGTH: usize = 6;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the question images are served from.
    pub media_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let media_base_url =
            env::var("MEDIA_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            media_base_url,
            rust_log,
        }
    }

    /// Resolves a question image path against the media base URL.
    ///
    /// Paths that are already absolute URLs pass through untouched.
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        let path = path?;

        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }

        match Url::parse(&self.media_base_url).and_then(|base| base.join(path)) {
            Ok(full) => Some(full.to_string()),
            Err(e) => {
                tracing::error!("Failed to build image URL for '{}': {}", path, e);
                None
            }
        }
    }
}
