mod article_store;
mod connection;
mod news_source_store;

pub use article_store::SqliteArticleStore;
pub use connection::SqliteStorage;
pub use news_source_store::SqliteNewsSourceStore;
