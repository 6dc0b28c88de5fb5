use clap::{Parser, Subcommand};

use crate::domain::Category;
use crate::sources::SortOrder;

#[derive(Parser)]
#[command(name = "newsreel")]
#[command(about = "News articles with a local favourites cache")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the article list and sync it into the local cache
    Articles {
        /// Free-text search sent to the API
        #[arg(short, long)]
        query: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        page_size: Option<u32>,

        /// Category requested from the API (Politics, Gaming, Sports, ...)
        #[arg(short, long)]
        category: Option<Category>,

        /// Field the API sorts by
        #[arg(long)]
        sort_by: Option<String>,

        /// Order the API sorts in (asc or desc)
        #[arg(long)]
        order: Option<SortOrder>,

        /// Sort the fetched list by title locally (asc or desc)
        #[arg(long)]
        sort_title: Option<SortOrder>,

        /// Keep only one category from the fetched list
        #[arg(long)]
        filter_category: Option<Category>,
    },

    /// Show one article, from the cache when the API is unreachable
    Show {
        /// Article ID
        id: String,
    },

    /// Mark an article as favourite
    Favorite {
        /// Article ID
        id: String,
    },

    /// Clear the favourite mark of an article
    Unfavorite {
        /// Article ID
        id: String,
    },

    /// List favourite articles
    Favorites {
        /// Only show favourites whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Remove an article from the favourites cache
    RemoveFavorite {
        /// Article ID
        id: String,
    },

    /// List news sources seen in the latest articles
    Sources,
}
