use serde::{Deserialize, Deserializer, Serialize};

use super::Category;

/// Accepts either a JSON string or number for ids.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct StringOrNumberVisitor;

    impl<'de> Visitor<'de> for StringOrNumberVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_i64<E>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_str<E>(self, v: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Article as returned by the news API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_at: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: i64,
}

impl ArticleRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            published_at: String::new(),
            source: None,
            category: Category::None,
            author: None,
            title: None,
            description: None,
            image_url: None,
            votes: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = published_at.into();
        self
    }
}

/// Paged envelope of the article list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticlePage {
    #[serde(deserialize_with = "null_as_default")]
    pub total_articles: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub current_page: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub page_size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub articles: Vec<ArticleRecord>,
}

/// Row of the local `article` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleEntity {
    pub id: String,
    pub is_favorite: bool,
    pub published_at: String,
    pub source: Option<String>,
    pub category: Category,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub votes: i64,
}

/// What the list, detail and favourites screens render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: String,
    pub published_at: String,
    pub source: String,
    pub category: Category,
    pub author: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub votes: i64,
    pub is_favorite: bool,
}
