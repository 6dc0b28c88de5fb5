use std::time::Duration;

use url::Url;

use crate::errors::{NewsError, NewsResult};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub db_path: String,
    pub http_timeout: Duration,
    pub page_size: Option<u32>,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> NewsResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let api_url = std::env::var("NEWS_API_URL")
            .map_err(|_| NewsError::MissingEnvVar("NEWS_API_URL".to_string()))?;
        let api_url = Self::normalize_api_url(&api_url)?;

        // Default db_path is relative to executable directory
        let db_path = std::env::var("NEWS_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("newsreel.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./newsreel.db".to_string())
        });

        let http_timeout = match std::env::var("NEWS_HTTP_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(Self::parse_positive("NEWS_HTTP_TIMEOUT_SECS", &raw)?),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let page_size = match std::env::var("NEWS_PAGE_SIZE") {
            Ok(raw) => Some(Self::parse_positive("NEWS_PAGE_SIZE", &raw)?),
            Err(_) => None,
        };

        Ok(Self {
            api_url,
            db_path,
            http_timeout,
            page_size,
        })
    }

    /// Validate the API base URL and strip any trailing slash
    pub fn normalize_api_url(raw: &str) -> NewsResult<String> {
        let parsed = Url::parse(raw.trim()).map_err(|e| NewsError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NewsError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                raw,
                parsed.scheme()
            )));
        }
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }

    /// Rejects zero as well as anything that does not parse
    fn parse_positive<T>(name: &str, raw: &str) -> NewsResult<T>
    where
        T: std::str::FromStr + Default + PartialEq,
    {
        match raw.trim().parse::<T>() {
            Ok(n) if n != T::default() => Ok(n),
            _ => Err(NewsError::Config(format!(
                "{} must be a positive number, got {:?}",
                name, raw
            ))),
        }
    }
}
