use crate::domain::{ArticlePage, ArticleRecord};
use crate::errors::NewsResult;
use crate::sources::query::ArticleQuery;

/// Remote side of the article data. Implementations never retry.
#[cfg_attr(test, mockall::automock)]
pub trait RemoteArticleSource: Send + Sync {
    /// Fetch one page of article summaries
    fn fetch_articles(&self, query: &ArticleQuery) -> NewsResult<ArticlePage>;

    /// Fetch a single article
    fn fetch_article_by_id(&self, id: &str) -> NewsResult<ArticleRecord>;
}
