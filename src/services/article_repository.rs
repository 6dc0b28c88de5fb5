use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::ArticleView;
use crate::errors::NewsResult;
use crate::factories::ArticleViewFactory;
use crate::sources::{ArticleQuery, RemoteArticleSource};
use crate::storage::traits::ArticleStore;

/// Merges remote article data with the locally cached favourite state.
///
/// The remote source owns every field except `is_favorite`; the store owns
/// `is_favorite`.
pub struct ArticleRepository<R: RemoteArticleSource, S: ArticleStore> {
    remote: R,
    store: S,
}

impl<R: RemoteArticleSource, S: ArticleStore> ArticleRepository<R, S> {
    pub fn new(remote: R, store: S) -> Self {
        Self { remote, store }
    }

    /// Fetch a page of articles, carry over favourite flags and persist the
    /// result before returning it.
    ///
    /// There is no cache fallback here, unlike `get_article_by_id`.
    pub fn get_articles(&self, query: &ArticleQuery) -> NewsResult<Vec<ArticleView>> {
        let favorite_ids: HashSet<String> = self
            .store
            .get_favorites()?
            .into_iter()
            .map(|entity| entity.id)
            .collect();

        let page = self.remote.fetch_articles(query).map_err(|e| {
            warn!(error = %e, "article list fetch failed");
            e
        })?;

        let views: Vec<ArticleView> = page
            .articles
            .into_iter()
            .map(|record| {
                let is_favorite = favorite_ids.contains(&record.id);
                ArticleViewFactory::from_record(record, is_favorite)
            })
            .collect();

        let entities: Vec<_> = views.iter().map(ArticleViewFactory::to_entity).collect();
        self.store.upsert_batch(&entities)?;

        info!(count = views.len(), favorites = favorite_ids.len(), "articles synchronised");
        Ok(views)
    }

    /// Fetch one article, falling back to the cached copy when the API is
    /// unreachable or answers with an error.
    pub fn get_article_by_id(&self, id: &str) -> NewsResult<ArticleView> {
        let cached = match self.store.get_by_id(id) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(id, error = %e, "could not read cached article");
                None
            }
        };

        match self.remote.fetch_article_by_id(id) {
            Ok(record) => {
                let is_favorite = cached.map(|c| c.is_favorite).unwrap_or(false);
                Ok(ArticleViewFactory::from_record(record, is_favorite))
            }
            Err(e) if e.is_remote_failure() => match cached {
                Some(entity) => {
                    warn!(id, error = %e, "serving cached article");
                    Ok(ArticleViewFactory::from_entity(entity))
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    /// Persist `article` with the given favourite flag. Does not refresh.
    pub fn set_favorite(&self, article: &ArticleView, is_favorite: bool) -> NewsResult<ArticleView> {
        let updated = ArticleView {
            is_favorite,
            ..article.clone()
        };
        self.store.upsert(&ArticleViewFactory::to_entity(&updated))?;

        debug!(id = %updated.id, is_favorite, "favourite flag stored");
        Ok(updated)
    }

    pub fn toggle_favorite(&self, article: &ArticleView) -> NewsResult<ArticleView> {
        self.set_favorite(article, !article.is_favorite)
    }

    pub fn get_favorites(&self) -> NewsResult<Vec<ArticleView>> {
        Ok(self
            .store
            .get_favorites()?
            .into_iter()
            .map(ArticleViewFactory::from_entity)
            .collect())
    }

    /// Favourites whose title contains `text`, ignoring case
    pub fn search_favorites(&self, text: &str) -> NewsResult<Vec<ArticleView>> {
        let needle = text.trim().to_lowercase();
        let favorites = self.get_favorites()?;

        if needle.is_empty() {
            return Ok(favorites);
        }

        Ok(favorites
            .into_iter()
            .filter(|article| article.title.to_lowercase().contains(&needle))
            .collect())
    }

    /// Drop the cached article entirely
    pub fn remove_favorite(&self, id: &str) -> NewsResult<()> {
        self.store.delete_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleEntity, ArticlePage, ArticleRecord, Category};
    use crate::errors::{NewsError, NETWORK_ERROR_MESSAGE};
    use crate::sources::traits::MockRemoteArticleSource;
    use crate::storage::sqlite::{SqliteArticleStore, SqliteStorage};
    use crate::storage::traits::MockArticleStore;

    fn page(records: Vec<ArticleRecord>) -> ArticlePage {
        ArticlePage {
            total_articles: records.len() as i64,
            current_page: 1,
            total_pages: 1,
            page_size: records.len() as i64,
            articles: records,
        }
    }

    fn record(id: &str, title: &str) -> ArticleRecord {
        ArticleRecord::new(id)
            .with_title(title)
            .with_published_at("2024-02-10T09:15:00")
            .with_category(Category::Health)
    }

    fn transport_error() -> NewsError {
        // Port 1 is never listening, so this fails without a response
        let err = reqwest::blocking::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .unwrap_err();
        NewsError::Transport(err)
    }

    fn store() -> SqliteArticleStore {
        SqliteArticleStore::new(SqliteStorage::in_memory().unwrap())
    }

    fn favorite_entity(id: &str) -> ArticleEntity {
        ArticleEntity {
            id: id.to_string(),
            is_favorite: true,
            published_at: "2024-01-01 00:00:00".to_string(),
            source: None,
            category: Category::Health,
            author: None,
            title: Some("Cached".to_string()),
            description: None,
            image_url: None,
            votes: 1,
        }
    }

    #[test]
    fn test_get_articles_merges_favorites_and_persists() {
        let store = store();
        store.upsert(&favorite_entity("2")).unwrap();

        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_articles()
            .times(1)
            .returning(|_| Ok(page(vec![record("1", "One"), record("2", "Two")])));

        let repo = ArticleRepository::new(remote, store);
        let articles = repo.get_articles(&ArticleQuery::new()).unwrap();

        assert_eq!(articles.len(), 2);
        assert!(!articles[0].is_favorite);
        assert!(articles[1].is_favorite);
        assert_eq!(articles[1].title, "Two");
        assert_eq!(articles[0].published_at, "2024-02-10 09:15:00");

        // Both records are now cached, remote fields replacing the old copy
        let cached = repo.store.get_all().unwrap();
        assert_eq!(cached.len(), 2);
        let two = repo.store.get_by_id("2").unwrap().unwrap();
        assert_eq!(two.title.as_deref(), Some("Two"));
        assert!(two.is_favorite);
    }

    #[test]
    fn test_get_articles_is_idempotent() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_articles()
            .times(2)
            .returning(|_| Ok(page(vec![record("1", "One"), record("2", "Two")])));

        let repo = ArticleRepository::new(remote, store());
        let first = repo.get_articles(&ArticleQuery::new()).unwrap();
        let second = repo.get_articles(&ArticleQuery::new()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_get_articles_passes_query_through() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_articles()
            .withf(|q| q.category == Some(Category::Food) && q.query.as_deref() == Some("soup"))
            .times(1)
            .returning(|_| Ok(page(vec![])));

        let repo = ArticleRepository::new(remote, store());
        let query = ArticleQuery::new().with_query("soup").with_category(Category::Food);
        assert!(repo.get_articles(&query).unwrap().is_empty());
    }

    #[test]
    fn test_get_articles_transport_failure_has_no_fallback() {
        let store = store();
        store.upsert(&favorite_entity("1")).unwrap();

        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_articles()
            .returning(|_| Err(transport_error()));

        let repo = ArticleRepository::new(remote, store);
        let err = repo.get_articles(&ArticleQuery::new()).unwrap_err();

        assert!(matches!(err, NewsError::Transport(_)));
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_get_articles_server_error_carries_message() {
        let mut remote = MockRemoteArticleSource::new();
        remote.expect_fetch_articles().returning(|_| {
            Err(NewsError::Server {
                status: 503,
                message: "Maintenance".to_string(),
            })
        });

        let repo = ArticleRepository::new(remote, store());
        let err = repo.get_articles(&ArticleQuery::new()).unwrap_err();
        assert_eq!(err.user_message(), "Maintenance");
    }

    #[test]
    fn test_get_articles_surfaces_store_failure() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_articles()
            .returning(|_| Ok(page(vec![record("1", "One")])));

        let mut store = MockArticleStore::new();
        store.expect_get_favorites().returning(|| Ok(vec![]));
        store
            .expect_upsert_batch()
            .times(1)
            .returning(|_| Err(NewsError::Database(rusqlite::Error::InvalidQuery)));

        let repo = ArticleRepository::new(remote, store);
        assert!(matches!(
            repo.get_articles(&ArticleQuery::new()),
            Err(NewsError::Database(_))
        ));
    }

    #[test]
    fn test_get_article_by_id_falls_back_to_cache() {
        let store = store();
        store.upsert(&favorite_entity("4")).unwrap();

        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_article_by_id()
            .withf(|id| id == "4")
            .returning(|_| Err(transport_error()));

        let repo = ArticleRepository::new(remote, store);
        let article = repo.get_article_by_id("4").unwrap();

        assert_eq!(article.id, "4");
        assert!(article.is_favorite);
        assert_eq!(article.title, "Cached");
    }

    #[test]
    fn test_get_article_by_id_treats_unreadable_cache_as_miss() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_article_by_id()
            .times(1)
            .returning(|id| Ok(record(id, "Fresh title")));

        let mut store = MockArticleStore::new();
        store
            .expect_get_by_id()
            .withf(|id| id == "4")
            .times(1)
            .returning(|_| Err(NewsError::Database(rusqlite::Error::InvalidQuery)));

        let repo = ArticleRepository::new(remote, store);
        let article = repo.get_article_by_id("4").unwrap();

        assert_eq!(article.title, "Fresh title");
        assert!(!article.is_favorite);
    }

    #[test]
    fn test_get_article_by_id_unreadable_cache_keeps_remote_error() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_article_by_id()
            .returning(|_| Err(transport_error()));

        let mut store = MockArticleStore::new();
        store
            .expect_get_by_id()
            .returning(|_| Err(NewsError::Database(rusqlite::Error::InvalidQuery)));

        let repo = ArticleRepository::new(remote, store);
        assert!(matches!(
            repo.get_article_by_id("4"),
            Err(NewsError::Transport(_))
        ));
    }

    #[test]
    fn test_get_article_by_id_empty_body_falls_back_to_cache() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_article_by_id()
            .returning(|_| Err(NewsError::EmptyBody("no content".to_string())));

        let mut store = MockArticleStore::new();
        store
            .expect_get_by_id()
            .withf(|id| id == "4")
            .returning(|id| Ok(Some(favorite_entity(id))));

        let repo = ArticleRepository::new(remote, store);
        let article = repo.get_article_by_id("4").unwrap();

        assert_eq!(article.id, "4");
        assert_eq!(article.title, "Cached");
        assert!(article.is_favorite);
    }

    #[test]
    fn test_get_article_by_id_server_error_without_cache() {
        let mut remote = MockRemoteArticleSource::new();
        remote.expect_fetch_article_by_id().returning(|_| {
            Err(NewsError::Server {
                status: 404,
                message: "Not found".to_string(),
            })
        });

        let repo = ArticleRepository::new(remote, store());
        assert!(matches!(
            repo.get_article_by_id("4"),
            Err(NewsError::Server { status: 404, .. })
        ));
    }

    #[test]
    fn test_get_article_by_id_merges_cached_flag_without_persisting() {
        let store = store();
        store.upsert(&favorite_entity("4")).unwrap();

        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_article_by_id()
            .returning(|id| Ok(record(id, "Fresh title")));

        let repo = ArticleRepository::new(remote, store);
        let article = repo.get_article_by_id("4").unwrap();

        assert!(article.is_favorite);
        assert_eq!(article.title, "Fresh title");
        assert_eq!(article.published_at, "2024-02-10 09:15:00");

        let cached = repo.store.get_by_id("4").unwrap().unwrap();
        assert_eq!(cached.title.as_deref(), Some("Cached"));
    }

    #[test]
    fn test_toggle_then_refetch_reflects_favorite() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_article_by_id()
            .times(2)
            .returning(|id| Ok(record(id, "Story")));

        let repo = ArticleRepository::new(remote, store());
        let article = repo.get_article_by_id("8").unwrap();
        assert!(!article.is_favorite);

        let toggled = repo.toggle_favorite(&article).unwrap();
        assert!(toggled.is_favorite);

        let refetched = repo.get_article_by_id("8").unwrap();
        assert!(refetched.is_favorite);
    }

    #[test]
    fn test_favorite_survives_list_refresh() {
        let mut remote = MockRemoteArticleSource::new();
        remote
            .expect_fetch_articles()
            .times(2)
            .returning(|_| Ok(page(vec![record("1", "One"), record("2", "Two")])));

        let repo = ArticleRepository::new(remote, store());
        let articles = repo.get_articles(&ArticleQuery::new()).unwrap();
        repo.set_favorite(&articles[0], true).unwrap();

        let refreshed = repo.get_articles(&ArticleQuery::new()).unwrap();
        assert!(refreshed[0].is_favorite);
        assert!(!refreshed[1].is_favorite);
    }

    #[test]
    fn test_search_and_remove_favorites() {
        let remote = MockRemoteArticleSource::new();
        let store = store();
        let mut flu = favorite_entity("1");
        flu.title = Some("Flu season starts".to_string());
        let mut gym = favorite_entity("2");
        gym.title = Some("Gym tips".to_string());
        store.upsert_batch(&[flu, gym]).unwrap();

        let repo = ArticleRepository::new(remote, store);
        let found = repo.search_favorites("FLU").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
        assert_eq!(repo.search_favorites("  ").unwrap().len(), 2);

        repo.remove_favorite("1").unwrap();
        repo.remove_favorite("missing").unwrap();
        let remaining = repo.get_favorites().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "2");
    }
}
