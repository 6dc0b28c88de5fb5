use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceView {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Row of the local `news_source` table. `id` is `None` until inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntity {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
}

impl SourceEntity {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: None,
            title,
            description,
        }
    }
}
