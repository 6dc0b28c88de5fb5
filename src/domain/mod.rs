pub mod article;
pub mod category;
pub mod resource;
pub mod source;

pub use article::{ArticleEntity, ArticlePage, ArticleRecord, ArticleView};
pub use category::Category;
pub use resource::Resource;
pub use source::{SourceEntity, SourceView};
