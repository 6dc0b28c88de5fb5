use rusqlite::{Connection, Row};
use tracing::debug;

use crate::domain::{ArticleEntity, Category};
use crate::errors::{NewsError, NewsResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::ArticleStore;

const SELECT_COLUMNS: &str = "SELECT id, is_favorite, published_at, source, category, author, \
     title, description, image_url, votes FROM article";

const UPSERT: &str = "INSERT INTO article \
     (id, is_favorite, published_at, source, category, author, title, description, image_url, votes) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
     ON CONFLICT(id) DO UPDATE SET \
        is_favorite = excluded.is_favorite, \
        published_at = excluded.published_at, \
        source = excluded.source, \
        category = excluded.category, \
        author = excluded.author, \
        title = excluded.title, \
        description = excluded.description, \
        image_url = excluded.image_url, \
        votes = excluded.votes";

/// Raw row, category still as its stored ordinal
struct ArticleRow {
    id: String,
    is_favorite: bool,
    published_at: String,
    source: Option<String>,
    category: i64,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    votes: i64,
}

impl ArticleRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            is_favorite: row.get(1)?,
            published_at: row.get(2)?,
            source: row.get(3)?,
            category: row.get(4)?,
            author: row.get(5)?,
            title: row.get(6)?,
            description: row.get(7)?,
            image_url: row.get(8)?,
            votes: row.get(9)?,
        })
    }

    fn into_entity(self) -> NewsResult<ArticleEntity> {
        Ok(ArticleEntity {
            category: Category::from_ordinal(self.category)?,
            id: self.id,
            is_favorite: self.is_favorite,
            published_at: self.published_at,
            source: self.source,
            author: self.author,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            votes: self.votes,
        })
    }
}

pub struct SqliteArticleStore {
    storage: SqliteStorage,
}

impl SqliteArticleStore {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn query(conn: &Connection, sql: &str) -> NewsResult<Vec<ArticleEntity>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], ArticleRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ArticleRow::into_entity).collect()
    }

    fn write(conn: &Connection, entity: &ArticleEntity) -> rusqlite::Result<usize> {
        conn.execute(
            UPSERT,
            (
                &entity.id,
                entity.is_favorite,
                &entity.published_at,
                &entity.source,
                entity.category.ordinal(),
                &entity.author,
                &entity.title,
                &entity.description,
                &entity.image_url,
                entity.votes,
            ),
        )
    }
}

impl ArticleStore for SqliteArticleStore {
    fn get_all(&self) -> NewsResult<Vec<ArticleEntity>> {
        let conn = self.storage.connection()?;
        Self::query(&conn, &format!("{} ORDER BY rowid", SELECT_COLUMNS))
    }

    fn get_favorites(&self) -> NewsResult<Vec<ArticleEntity>> {
        let conn = self.storage.connection()?;
        Self::query(
            &conn,
            &format!("{} WHERE is_favorite = 1 ORDER BY rowid", SELECT_COLUMNS),
        )
    }

    fn get_by_id(&self, id: &str) -> NewsResult<Option<ArticleEntity>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;

        match stmt.query_row([id], ArticleRow::from_row) {
            Ok(row) => row.into_entity().map(Some),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(NewsError::from(e)),
        }
    }

    fn upsert(&self, entity: &ArticleEntity) -> NewsResult<()> {
        let conn = self.storage.connection()?;
        Self::write(&conn, entity)?;
        debug!(id = %entity.id, favorite = entity.is_favorite, "stored article");
        Ok(())
    }

    fn upsert_batch(&self, entities: &[ArticleEntity]) -> NewsResult<()> {
        if entities.is_empty() {
            return Ok(());
        }

        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;
        for entity in entities {
            Self::write(&tx, entity)?;
        }
        tx.commit()?;

        debug!(count = entities.len(), "stored article batch");
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> NewsResult<()> {
        let conn = self.storage.connection()?;
        conn.execute("DELETE FROM article WHERE id = ?1", [id])?;
        Ok(())
    }
}
