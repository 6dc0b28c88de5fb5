use crate::domain::{ArticleView, Resource};
use crate::errors::NewsResult;
use crate::services::article_repository::ArticleRepository;
use crate::sources::RemoteArticleSource;
use crate::storage::traits::ArticleStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesState {
    pub favorites: Vec<ArticleView>,
    pub search_text: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Favourites screen: a snapshot of the stored favourites narrowed by the
/// current search text.
pub struct FavoritesController<R: RemoteArticleSource, S: ArticleStore> {
    repository: ArticleRepository<R, S>,
    state: FavoritesState,
}

impl<R: RemoteArticleSource, S: ArticleStore> FavoritesController<R, S> {
    pub fn new(repository: ArticleRepository<R, S>) -> Self {
        Self {
            repository,
            state: FavoritesState::default(),
        }
    }

    pub fn state(&self) -> &FavoritesState {
        &self.state
    }

    pub fn load(&mut self) {
        self.state.is_loading = true;
        let result = self.repository.search_favorites(&self.state.search_text);
        self.state.is_loading = false;

        match result {
            Ok(favorites) => {
                self.state.favorites = favorites;
                self.state.error = None;
            }
            Err(e) => {
                self.state.favorites.clear();
                self.state.error = Some(e.user_message());
            }
        }
    }

    pub fn search(&mut self, text: &str) {
        self.state.search_text = text.to_string();
        self.load();
    }

    /// Delete the article from the cache, then reload the list
    pub fn remove(&mut self, id: &str) -> NewsResult<()> {
        self.repository.remove_favorite(id)?;
        self.load();
        Ok(())
    }

    pub fn resource(&self) -> Resource<Vec<ArticleView>> {
        if self.state.is_loading {
            return Resource::Loading;
        }
        match &self.state.error {
            Some(message) => Resource::Error {
                message: message.clone(),
                data: None,
            },
            None => Resource::Success(self.state.favorites.clone()),
        }
    }
}
