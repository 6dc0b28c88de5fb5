use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use newsreel::cli::{Cli, Commands};
use newsreel::config::Config;
use newsreel::domain::{ArticleView, Category, Resource, SourceView};
use newsreel::services::{
    ArticleListController, ArticleRepository, FavoritesController, NewsSourceRepository,
};
use newsreel::sources::{ArticleQuery, HttpArticleSource, SortOrder};
use newsreel::storage::sqlite::{SqliteArticleStore, SqliteNewsSourceStore, SqliteStorage};

type Repository = ArticleRepository<HttpArticleSource, SqliteArticleStore>;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("loading configuration")?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)
        .with_context(|| format!("opening database {}", config.db_path))?;

    let remote = HttpArticleSource::with_timeout(&config.api_url, config.http_timeout)
        .with_default_page_size(config.page_size);

    match cli.command {
        Commands::Articles {
            query,
            page,
            page_size,
            category,
            sort_by,
            order,
            sort_title,
            filter_category,
        } => {
            let query = ArticleQuery {
                query,
                page,
                page_size,
                category,
                sort_by,
                order,
                ..Default::default()
            };
            cmd_articles(article_repository(remote, storage), query, sort_title, filter_category)
        }
        Commands::Show { id } => cmd_show(article_repository(remote, storage), &id),
        Commands::Favorite { id } => {
            cmd_set_favorite(article_repository(remote, storage), &id, true)
        }
        Commands::Unfavorite { id } => {
            cmd_set_favorite(article_repository(remote, storage), &id, false)
        }
        Commands::Favorites { search } => cmd_favorites(article_repository(remote, storage), search),
        Commands::RemoveFavorite { id } => {
            cmd_remove_favorite(article_repository(remote, storage), &id)
        }
        Commands::Sources => cmd_sources(NewsSourceRepository::new(
            remote,
            SqliteNewsSourceStore::new(storage),
        )),
    }
}

fn article_repository(remote: HttpArticleSource, storage: SqliteStorage) -> Repository {
    ArticleRepository::new(remote, SqliteArticleStore::new(storage))
}

fn cmd_articles(
    repository: Repository,
    query: ArticleQuery,
    sort_title: Option<SortOrder>,
    filter_category: Option<Category>,
) -> anyhow::Result<()> {
    let mut controller = ArticleListController::new(repository).with_observer(|state| {
        if state.is_loading {
            render_loading();
        }
    });

    controller.load(query);
    if let Some(category) = filter_category {
        controller.filter_by_category(category);
    }
    if let Some(direction) = sort_title {
        controller.sort_by_title(direction);
    }

    let articles = unwrap_resource(controller.resource())?;
    if articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    for article in &articles {
        print_article_line(article);
    }
    Ok(())
}

fn cmd_show(repository: Repository, id: &str) -> anyhow::Result<()> {
    render_loading();
    let article = unwrap_resource(Resource::from_result(repository.get_article_by_id(id)))?;

    print_article_line(&article);
    if !article.author.is_empty() {
        println!("  By: {}", article.author);
    }
    if !article.published_at.is_empty() {
        println!("  Published: {}", article.published_at);
    }
    println!("  Votes: {}", article.votes);
    if !article.image_url.is_empty() {
        println!("  Image: {}", article.image_url);
    }
    if !article.description.is_empty() {
        println!();
        println!("  {}", article.description);
    }
    Ok(())
}

fn cmd_set_favorite(repository: Repository, id: &str, is_favorite: bool) -> anyhow::Result<()> {
    render_loading();
    let article = unwrap_resource(Resource::from_result(repository.get_article_by_id(id)))?;
    let updated = unwrap_resource(Resource::from_result(
        repository.set_favorite(&article, is_favorite),
    ))?;

    if updated.is_favorite {
        println!("Added to favourites: {}", display_title(&updated));
    } else {
        println!("Removed favourite mark: {}", display_title(&updated));
    }
    Ok(())
}

fn cmd_favorites(repository: Repository, search: Option<String>) -> anyhow::Result<()> {
    let mut controller = FavoritesController::new(repository);
    match search {
        Some(text) => controller.search(&text),
        None => controller.load(),
    }

    let favorites = unwrap_resource(controller.resource())?;
    if favorites.is_empty() {
        println!("No favourite articles.");
        return Ok(());
    }

    for article in &favorites {
        print_article_line(article);
    }
    Ok(())
}

fn cmd_remove_favorite(repository: Repository, id: &str) -> anyhow::Result<()> {
    unwrap_resource(Resource::from_result(repository.remove_favorite(id)))?;
    println!("Removed: {}", id);
    Ok(())
}

fn cmd_sources(
    repository: NewsSourceRepository<HttpArticleSource, SqliteNewsSourceStore>,
) -> anyhow::Result<()> {
    render_loading();
    let sources: Vec<SourceView> = unwrap_resource(Resource::from_result(repository.get_sources()))?;

    if sources.is_empty() {
        println!("No news sources found.");
        return Ok(());
    }

    println!("News sources:\n");
    for source in sources {
        println!("  {}", source.title);
        if !source.description.is_empty() {
            println!("    {}", source.description);
        }
    }
    Ok(())
}

fn render_loading() {
    eprintln!("Loading...");
}

fn unwrap_resource<T>(resource: Resource<T>) -> anyhow::Result<T> {
    match resource {
        Resource::Success(data) => Ok(data),
        Resource::Error { message, .. } => bail!("{}", message),
        Resource::Loading => bail!("request did not complete"),
    }
}

fn display_title(article: &ArticleView) -> &str {
    if article.title.is_empty() {
        "(untitled)"
    } else {
        &article.title
    }
}

fn print_article_line(article: &ArticleView) {
    let marker = if article.is_favorite { "*" } else { " " };
    let mut line = format!("{} [{}] {}", marker, article.id, display_title(article));

    if article.category != Category::None {
        line.push_str(&format!(" ({})", article.category));
    }
    if !article.source.is_empty() {
        line.push_str(&format!(" - {}", article.source));
    }

    println!("{}", line);
}
