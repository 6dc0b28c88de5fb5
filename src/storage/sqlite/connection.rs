use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::errors::{NewsError, NewsResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS article (
    id TEXT PRIMARY KEY NOT NULL,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    published_at TEXT NOT NULL DEFAULT '',
    source TEXT,
    category INTEGER NOT NULL DEFAULT 8,
    author TEXT,
    title TEXT,
    description TEXT,
    image_url TEXT,
    votes INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_article_is_favorite ON article(is_favorite);

CREATE TABLE IF NOT EXISTS news_source (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);
"#;

#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> NewsResult<Self> {
        debug!(path = %path.as_ref().display(), "opening article database");
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> NewsResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, NewsError> {
        self.conn
            .lock()
            .map_err(|_| NewsError::Database(rusqlite::Error::InvalidQuery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(storage: &SqliteStorage, name: &str) -> bool {
        let conn = storage.connection().unwrap();
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name = ?1)",
            [name],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_create_in_memory_storage() {
        let storage = SqliteStorage::in_memory().unwrap();
        assert!(table_exists(&storage, "article"));
        assert!(table_exists(&storage, "news_source"));
    }

    #[test]
    fn test_reopen_file_storage_keeps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.db");

        SqliteStorage::new(&path).unwrap();
        let storage = SqliteStorage::new(&path).unwrap();
        assert!(table_exists(&storage, "article"));
    }
}
