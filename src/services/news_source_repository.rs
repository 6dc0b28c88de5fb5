use tracing::{info, warn};

use crate::domain::SourceView;
use crate::errors::NewsResult;
use crate::factories::SourceViewFactory;
use crate::sources::{ArticleQuery, RemoteArticleSource};
use crate::storage::traits::NewsSourceStore;

/// News sources are a projection of the article list, one per distinct
/// source title.
pub struct NewsSourceRepository<R: RemoteArticleSource, S: NewsSourceStore> {
    remote: R,
    store: S,
}

impl<R: RemoteArticleSource, S: NewsSourceStore> NewsSourceRepository<R, S> {
    pub fn new(remote: R, store: S) -> Self {
        Self { remote, store }
    }

    /// Rebuild the source table from the latest articles. When the API
    /// fails, previously stored sources are returned instead, if any.
    pub fn get_sources(&self) -> NewsResult<Vec<SourceView>> {
        match self.remote.fetch_articles(&ArticleQuery::new()) {
            Ok(page) => {
                let sources = SourceViewFactory::entities_from_records(&page.articles);
                self.store.replace_all(&sources)?;
                info!(count = sources.len(), "news sources refreshed");
            }
            Err(e) if e.is_remote_failure() => {
                let cached = self.stored_sources()?;
                if cached.is_empty() {
                    return Err(e);
                }
                warn!(error = %e, count = cached.len(), "serving cached news sources");
                return Ok(cached);
            }
            Err(e) => return Err(e),
        }

        self.stored_sources()
    }

    fn stored_sources(&self) -> NewsResult<Vec<SourceView>> {
        Ok(self
            .store
            .get_all()?
            .into_iter()
            .map(SourceViewFactory::from_entity)
            .collect())
    }
}
