pub mod http;
pub mod query;
pub mod traits;

pub use http::HttpArticleSource;
pub use query::{ArticleQuery, SortOrder};
pub use traits::RemoteArticleSource;
