pub mod article_repository;
pub mod favorites_controller;
pub mod list_controller;
pub mod news_source_repository;

pub use article_repository::ArticleRepository;
pub use favorites_controller::{FavoritesController, FavoritesState};
pub use list_controller::{ArticleListController, ArticleListState};
pub use news_source_repository::NewsSourceRepository;
