use std::collections::HashSet;

use crate::domain::{ArticleRecord, SourceEntity, SourceView};

pub struct SourceViewFactory;

impl SourceViewFactory {
    /// One unsaved entity per distinct source title, in first-seen order.
    /// Articles without a source are skipped.
    pub fn entities_from_records(records: &[ArticleRecord]) -> Vec<SourceEntity> {
        let mut seen = HashSet::new();

        records
            .iter()
            .filter_map(|record| {
                let title = record.source.as_deref()?.trim();
                if title.is_empty() || !seen.insert(title.to_string()) {
                    return None;
                }
                Some(SourceEntity::new(
                    title.to_string(),
                    record.description.clone().unwrap_or_default(),
                ))
            })
            .collect()
    }

    pub fn from_entity(entity: SourceEntity) -> SourceView {
        SourceView {
            id: entity.id.unwrap_or_default(),
            title: entity.title,
            description: entity.description,
        }
    }

    pub fn to_entity(view: &SourceView) -> SourceEntity {
        SourceEntity {
            id: Some(view.id),
            title: view.title.clone(),
            description: view.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupes_by_title_first_wins() {
        let mut first = ArticleRecord::new("1").with_source("Herald");
        first.description = Some("first".to_string());
        let mut second = ArticleRecord::new("2").with_source("Herald");
        second.description = Some("second".to_string());
        let records = vec![
            first,
            ArticleRecord::new("3").with_source("Gazette"),
            second,
            ArticleRecord::new("4"),
            ArticleRecord::new("5").with_source("  "),
        ];

        let sources = SourceViewFactory::entities_from_records(&records);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "Herald");
        assert_eq!(sources[0].description, "first");
        assert_eq!(sources[1].title, "Gazette");
        assert_eq!(sources[1].description, "");
        assert!(sources.iter().all(|s| s.id.is_none()));
    }

    #[test]
    fn test_entity_without_id_maps_to_zero() {
        let view = SourceViewFactory::from_entity(SourceEntity::new(
            "Herald".to_string(),
            String::new(),
        ));
        assert_eq!(view.id, 0);
        assert_eq!(SourceViewFactory::to_entity(&view).id, Some(0));
    }
}
