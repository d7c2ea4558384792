use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use reelstate::catalog::{SharedCatalog, TmdbCatalog};
use reelstate::config::Config;
use reelstate::domain::{Movie, MovieCategory};
use reelstate::favorites::FavoritesStore;
use reelstate::features::home::{HomeIntent, HomeReducer, HomeState, HomeTransformer, HomeView};
use reelstate::features::search::{SearchIntent, SearchReducer, SearchState};
use reelstate::logging::init_tracing;
use reelstate::mvi::Store;

#[derive(Parser)]
#[command(name = "reelstate", version)]
#[command(about = "Browse the movie catalog through reactive state stores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ~/.config/reelstate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Seconds to wait for results before giving up
    #[arg(long, global = true, default_value_t = 30)]
    wait: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the home screen sections
    Home {
        /// Load a single category (trending, now-playing, popular, top-rated, upcoming)
        #[arg(long)]
        category: Option<MovieCategory>,
    },

    /// Search movies by title
    Search {
        /// Search text
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let catalog: SharedCatalog = Arc::new(TmdbCatalog::from_config(&config.api)?);
    let wait = Duration::from_secs(cli.wait);

    match cli.command {
        Commands::Home { category } => {
            let view = run_home(&config, catalog, category, wait).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_home(&view);
            }
        }
        Commands::Search { query } => {
            let state = run_search(&config, catalog, &query, wait).await?;
            if cli.json {
                let output = json!({
                    "query": state.query,
                    "results": state.results,
                    "error": state.error,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_search(&state);
            }
        }
    }

    Ok(())
}

async fn run_home(
    config: &Config,
    catalog: SharedCatalog,
    category: Option<MovieCategory>,
    wait: Duration,
) -> Result<HomeView> {
    let categories: Vec<MovieCategory> = match category {
        Some(category) => vec![category],
        None => MovieCategory::ALL.to_vec(),
    };

    let reducer = HomeReducer::new(catalog, FavoritesStore::new());
    let store = Store::with_config(HomeState::default(), reducer, &config.store);
    let mut states = store.subscribe();
    store.start()?;
    match category {
        Some(category) => store.publish(HomeIntent::LoadCategory(category)),
        None => store.publish(HomeIntent::LoadAllMovies),
    }

    let state = tokio::time::timeout(
        wait,
        states.wait_for(|state| state.is_settled(categories.iter().copied())),
    )
    .await
    .context("Timed out waiting for movies")?
    .context("Home store stopped unexpectedly")?;

    Ok(HomeTransformer.transform_only(&state, categories))
}

async fn run_search(
    config: &Config,
    catalog: SharedCatalog,
    query: &str,
    wait: Duration,
) -> Result<SearchState> {
    if query.trim().is_empty() {
        bail!("Search query must not be empty");
    }

    let reducer = SearchReducer::new(catalog, FavoritesStore::new(), &config.search);
    let store = Store::with_config(SearchState::default(), reducer, &config.store);
    let mut states = store.subscribe();
    store.start()?;
    store.publish(SearchIntent::PerformSearch(query.to_string()));

    let finished = async {
        states.wait_for(|state| state.is_searching).await?;
        states.wait_for(|state| !state.is_searching).await
    };
    tokio::time::timeout(wait, finished)
        .await
        .context("Timed out waiting for search results")?
        .context("Search store stopped unexpectedly")
}

fn print_home(view: &HomeView) {
    for section in &view.sections {
        println!("== {} ==", section.title);
        if let Some(error) = &section.error {
            println!("  error: {}", error);
            continue;
        }
        if section.movies.is_empty() {
            println!("  (no movies)");
        }
        for movie in &section.movies {
            print_movie(movie);
        }
        println!();
    }
}

fn print_search(state: &SearchState) {
    if let Some(error) = &state.error {
        println!("error: {}", error);
    }
    if state.results.is_empty() {
        println!("No movies match '{}'", state.query);
        return;
    }
    for movie in &state.results {
        print_movie(movie);
    }
}

fn print_movie(movie: &Movie) {
    let year = movie.release_year().unwrap_or("----");
    let star = if movie.is_favorite { "*" } else { " " };
    println!(
        " {} {:<48} {}  {:>4.1} ({} votes)",
        star, movie.title, year, movie.vote_average, movie.vote_count
    );
}
