use anyhow::{Result, anyhow};
use platform_db::{
    PageRequest,
    page::{DEFAULT_NAVIGATE_PAGES, DEFAULT_PAGE_SIZE},
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub page_size: u64,
    pub navigate_pages: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:5173".into()],
            page_size: DEFAULT_PAGE_SIZE,
            navigate_pages: DEFAULT_NAVIGATE_PAGES,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let page_size = env_positive("PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let navigate_pages = env_positive("NAVIGATE_PAGES", DEFAULT_NAVIGATE_PAGES)?;

        Ok(Self {
            cors_allowed_origins,
            page_size,
            navigate_pages,
        })
    }

    /// Page request for the 1-based page `pn` using the configured sizes.
    pub fn page_request(&self, pn: u64) -> PageRequest {
        PageRequest::new(pn, self.page_size).with_navigate_pages(self.navigate_pages)
    }
}

fn env_positive(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| anyhow!("{} must be a positive integer, got `{}`", key, raw)),
        Err(_) => Ok(default),
    }
}
