use crate::domain::SourceEntity;
use crate::errors::{NewsError, NewsResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::NewsSourceStore;

pub struct SqliteNewsSourceStore {
    storage: SqliteStorage,
}

impl SqliteNewsSourceStore {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl NewsSourceStore for SqliteNewsSourceStore {
    fn get_all(&self) -> NewsResult<Vec<SourceEntity>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare("SELECT id, title, description FROM news_source ORDER BY id")?;

        let sources = stmt.query_map([], |row| {
            Ok(SourceEntity {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                description: row.get(2)?,
            })
        })?;

        sources.collect::<Result<Vec<_>, _>>().map_err(NewsError::from)
    }

    fn replace_all(&self, sources: &[SourceEntity]) -> NewsResult<()> {
        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM news_source", [])?;
        for source in sources {
            tx.execute(
                "INSERT INTO news_source (title, description) VALUES (?1, ?2)",
                (&source.title, &source.description),
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
