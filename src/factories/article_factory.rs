use crate::domain::{ArticleEntity, ArticleRecord, ArticleView};

/// Separator the API puts between date and time in `publishedAt`.
pub const PUBLISHED_AT_PLACEHOLDER: &str = "T";

/// Replace every placeholder marker in an API timestamp with a single space.
pub fn normalize_published_at(raw: &str) -> String {
    raw.replace(PUBLISHED_AT_PLACEHOLDER, " ")
}

pub struct ArticleViewFactory;

impl ArticleViewFactory {
    pub fn from_record(record: ArticleRecord, is_favorite: bool) -> ArticleView {
        ArticleView {
            published_at: normalize_published_at(&record.published_at),
            id: record.id,
            source: record.source.unwrap_or_default(),
            category: record.category,
            author: record.author.unwrap_or_default(),
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            image_url: record.image_url.unwrap_or_default(),
            votes: record.votes,
            is_favorite,
        }
    }

    pub fn from_entity(entity: ArticleEntity) -> ArticleView {
        ArticleView {
            id: entity.id,
            published_at: entity.published_at,
            source: entity.source.unwrap_or_default(),
            category: entity.category,
            author: entity.author.unwrap_or_default(),
            title: entity.title.unwrap_or_default(),
            description: entity.description.unwrap_or_default(),
            image_url: entity.image_url.unwrap_or_default(),
            votes: entity.votes,
            is_favorite: entity.is_favorite,
        }
    }

    pub fn to_entity(view: &ArticleView) -> ArticleEntity {
        ArticleEntity {
            id: view.id.clone(),
            is_favorite: view.is_favorite,
            published_at: view.published_at.clone(),
            source: non_empty(&view.source),
            category: view.category,
            author: non_empty(&view.author),
            title: non_empty(&view.title),
            description: non_empty(&view.description),
            image_url: non_empty(&view.image_url),
            votes: view.votes,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
