use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{ArticlePage, ArticleRecord};
use crate::errors::{NewsError, NewsResult};
use crate::sources::query::ArticleQuery;
use crate::sources::traits::RemoteArticleSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Article API client over blocking HTTP.
pub struct HttpArticleSource {
    client: Client,
    base_url: String,
    default_page_size: Option<u32>,
}

impl HttpArticleSource {
    /// `base_url` should be like `https://news.example.com/api` (no trailing slash).
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            default_page_size: None,
        }
    }

    /// Page size sent when a query leaves it unset
    pub fn with_default_page_size(mut self, page_size: Option<u32>) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Build `{base}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> NewsResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| NewsError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| NewsError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn params(&self, query: &ArticleQuery) -> Vec<(&'static str, String)> {
        let mut query = query.clone();
        if query.page_size.is_none() {
            query.page_size = self.default_page_size;
        }
        query.to_params()
    }

    /// Turn a response into `T`, classifying non-2xx and empty bodies
    fn decode<T: DeserializeOwned>(response: Response) -> NewsResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = Self::server_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            warn!(status = status.as_u16(), message = %message, "article API returned an error");
            return Err(NewsError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text()?;
        if body.trim().is_empty() {
            return Err(NewsError::EmptyBody("response body is empty".to_string()));
        }

        serde_json::from_str(&body).map_err(|e| NewsError::EmptyBody(e.to_string()))
    }

    /// Prefer the JSON `message` field, then the raw body
    fn server_message(body: &str) -> Option<String> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => Some(m),
            Ok(_) => None,
            Err(_) => Some(body.to_string()),
        }
    }
}

impl RemoteArticleSource for HttpArticleSource {
    fn fetch_articles(&self, query: &ArticleQuery) -> NewsResult<ArticlePage> {
        let url = self.endpoint(&["articles"])?;
        let params = self.params(query);

        debug!(url = %url, params = ?params, "fetching article list");
        let response = self.client.get(url).query(&params).send()?;
        let page: ArticlePage = Self::decode(response)?;

        info!(
            count = page.articles.len(),
            page = page.current_page,
            total = page.total_articles,
            "fetched article list"
        );
        Ok(page)
    }

    fn fetch_article_by_id(&self, id: &str) -> NewsResult<ArticleRecord> {
        let url = self.endpoint(&["articles", id])?;

        debug!(url = %url, "fetching article");
        let response = self.client.get(url).send()?;
        Self::decode(response)
    }
}
