use std::cmp::Ordering;

use tracing::debug;

use crate::domain::{ArticleView, Category, Resource};
use crate::errors::{NewsError, NewsResult};
use crate::services::article_repository::ArticleRepository;
use crate::sources::{ArticleQuery, RemoteArticleSource, SortOrder};
use crate::storage::traits::ArticleStore;

/// Snapshot of the article list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleListState {
    /// What the screen shows: `fetched` with the filter and sort applied
    pub articles: Vec<ArticleView>,
    /// Result of the last fetch, in API order
    pub fetched: Vec<ArticleView>,
    pub query: ArticleQuery,
    pub sort: Option<SortOrder>,
    pub category_filter: Option<Category>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ArticleListState {
    pub fn resource(&self) -> Resource<Vec<ArticleView>> {
        if self.is_loading {
            return Resource::Loading;
        }
        match &self.error {
            Some(message) => Resource::Error {
                message: message.clone(),
                data: None,
            },
            None => Resource::Success(self.articles.clone()),
        }
    }
}

type StateObserver = Box<dyn FnMut(&ArticleListState)>;

/// Drives the article list: loading, in-memory sort and category filter.
///
/// Selecting the active sort or filter a second time clears it and fetches
/// the list again rather than restoring the earlier order.
pub struct ArticleListController<R: RemoteArticleSource, S: ArticleStore> {
    repository: ArticleRepository<R, S>,
    state: ArticleListState,
    observer: Option<StateObserver>,
}

impl<R: RemoteArticleSource, S: ArticleStore> ArticleListController<R, S> {
    pub fn new(repository: ArticleRepository<R, S>) -> Self {
        Self {
            repository,
            state: ArticleListState::default(),
            observer: None,
        }
    }

    /// Called with every state change, including the loading transitions
    pub fn with_observer(mut self, observer: impl FnMut(&ArticleListState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ArticleListState {
        &self.state
    }

    pub fn resource(&self) -> Resource<Vec<ArticleView>> {
        self.state.resource()
    }

    pub fn repository(&self) -> &ArticleRepository<R, S> {
        &self.repository
    }

    /// Start over with a new query; any sort or filter is dropped
    pub fn load(&mut self, query: ArticleQuery) {
        self.state.query = query;
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.state.sort = None;
        self.state.category_filter = None;

        self.state.is_loading = true;
        self.state.error = None;
        self.notify();

        let result = self.repository.get_articles(&self.state.query);

        self.state.is_loading = false;
        match result {
            Ok(articles) => {
                self.state.articles = articles.clone();
                self.state.fetched = articles;
            }
            Err(e) => {
                debug!(error = %e, "article list load failed");
                self.state.articles.clear();
                self.state.fetched.clear();
                self.state.error = Some(e.user_message());
            }
        }
        self.notify();
    }

    pub fn sort_by_title(&mut self, direction: SortOrder) {
        if self.state.sort == Some(direction) {
            self.refresh();
            return;
        }

        self.state.sort = Some(direction);
        self.apply_view();
        self.notify();
    }

    pub fn filter_by_category(&mut self, category: Category) {
        if self.state.category_filter == Some(category) {
            self.refresh();
            return;
        }

        self.state.category_filter = Some(category);
        self.apply_view();
        self.notify();
    }

    /// Flip the favourite flag of a listed article and update it in place
    pub fn toggle_favorite(&mut self, id: &str) -> NewsResult<ArticleView> {
        let index = self
            .state
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| NewsError::ArticleNotFound(id.to_string()))?;

        let updated = self.repository.toggle_favorite(&self.state.articles[index])?;
        self.state.articles[index] = updated.clone();
        if let Some(fetched) = self.state.fetched.iter_mut().find(|a| a.id == id) {
            *fetched = updated.clone();
        }
        self.notify();
        Ok(updated)
    }

    /// Rebuild `articles` from `fetched` using the active filter and sort
    fn apply_view(&mut self) {
        let mut articles: Vec<ArticleView> = match self.state.category_filter {
            Some(category) => self
                .state
                .fetched
                .iter()
                .filter(|a| a.category == category)
                .cloned()
                .collect(),
            None => self.state.fetched.clone(),
        };

        if let Some(direction) = self.state.sort {
            articles.sort_by(|a, b| compare_titles(a, b, direction));
        }

        self.state.articles = articles;
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}

fn compare_titles(a: &ArticleView, b: &ArticleView, direction: SortOrder) -> Ordering {
    let ordering = a.title.to_lowercase().cmp(&b.title.to_lowercase());
    match direction {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}
