pub mod article_factory;
pub mod source_factory;

pub use article_factory::{normalize_published_at, ArticleViewFactory, PUBLISHED_AT_PLACEHOLDER};
pub use source_factory::SourceViewFactory;
