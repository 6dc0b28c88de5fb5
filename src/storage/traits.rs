use crate::domain::{ArticleEntity, SourceEntity};
use crate::errors::NewsResult;

/// Durable article cache. Every call is atomic.
#[cfg_attr(test, mockall::automock)]
pub trait ArticleStore: Send + Sync {
    fn get_all(&self) -> NewsResult<Vec<ArticleEntity>>;
    /// Point-in-time snapshot of the favourites
    fn get_favorites(&self) -> NewsResult<Vec<ArticleEntity>>;
    fn get_by_id(&self, id: &str) -> NewsResult<Option<ArticleEntity>>;
    fn upsert(&self, entity: &ArticleEntity) -> NewsResult<()>;
    fn upsert_batch(&self, entities: &[ArticleEntity]) -> NewsResult<()>;
    fn delete_by_id(&self, id: &str) -> NewsResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait NewsSourceStore: Send + Sync {
    fn get_all(&self) -> NewsResult<Vec<SourceEntity>>;
    /// Swap the whole table for `sources`; ids are reassigned
    fn replace_all(&self, sources: &[SourceEntity]) -> NewsResult<()>;
}
