use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{NewsError, NewsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Politics,
    Gaming,
    Sports,
    Culture,
    Food,
    Business,
    Health,
    Other,
    #[default]
    None,
}

/// Persisted ordinal for each category. The `article.category` column stores
/// the left-hand value, so entries must never be reordered.
const ORDINALS: &[(i64, Category)] = &[
    (0, Category::Politics),
    (1, Category::Gaming),
    (2, Category::Sports),
    (3, Category::Culture),
    (4, Category::Food),
    (5, Category::Business),
    (6, Category::Health),
    (7, Category::Other),
    (8, Category::None),
];

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Politics,
        Category::Gaming,
        Category::Sports,
        Category::Culture,
        Category::Food,
        Category::Business,
        Category::Health,
        Category::Other,
        Category::None,
    ];

    pub fn ordinal(&self) -> i64 {
        ORDINALS
            .iter()
            .find(|(_, c)| c == self)
            .map(|(ordinal, _)| *ordinal)
            .unwrap_or(8)
    }

    pub fn from_ordinal(ordinal: i64) -> NewsResult<Self> {
        ORDINALS
            .iter()
            .find(|(o, _)| *o == ordinal)
            .map(|(_, c)| *c)
            .ok_or(NewsError::InvalidCategoryOrdinal(ordinal))
    }

    /// Exact wire name. `None` has no wire form and is sent as nothing.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Gaming => "Gaming",
            Category::Sports => "Sports",
            Category::Culture => "Culture",
            Category::Food => "Food",
            Category::Business => "Business",
            Category::Health => "Health",
            Category::Other => "Other",
            Category::None => "None",
        }
    }

    /// Case-sensitive lookup used when decoding API payloads.
    /// Anything unrecognised lands in `None`.
    pub fn from_wire(s: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .unwrap_or(Category::None)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Category::from_wire).unwrap_or_default())
    }
}
