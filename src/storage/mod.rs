pub mod sqlite;
pub mod traits;

pub use sqlite::{SqliteArticleStore, SqliteNewsSourceStore, SqliteStorage};
pub use traits::{ArticleStore, NewsSourceStore};
