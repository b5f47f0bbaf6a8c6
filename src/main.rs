use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use log::{debug, info};

use github_finder::{
    GITHUB_REST_ENDPOINT, HistoryStore, JsonFileHistoryStore, ProfileSearcher, RestFetcher,
    SearchOutcome, SearchPipeline, StdResult, format_count, format_join_date,
};

/// Command line arguments for the GitHub profile finder
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// GitHub login to look up
    username: String,

    /// File used to persist the recent search history
    #[arg(long, env = "GITHUB_FINDER_HISTORY_FILE")]
    history_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    let args = Args::parse();
    info!("Starting profile search for {}", args.username);

    let history_store = build_history_store(&args)?;
    let searcher = build_searcher(Arc::clone(&history_store))?;
    match searcher.search(&args.username).await {
        Ok(outcome) => {
            render_outcome(&outcome);
            render_history(history_store.as_ref()).await;

            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn build_history_store(args: &Args) -> StdResult<Arc<dyn HistoryStore>> {
    let path = match &args.history_file {
        Some(path) => path.clone(),
        None => default_history_path()?,
    };
    debug!("Using search history file {}", path.display());

    Ok(Arc::new(JsonFileHistoryStore::new(path)))
}

fn build_searcher(history_store: Arc<dyn HistoryStore>) -> StdResult<Arc<dyn ProfileSearcher>> {
    let fetcher = Arc::new(RestFetcher::try_new(GITHUB_REST_ENDPOINT)?);

    Ok(Arc::new(SearchPipeline::new(fetcher, history_store)))
}

fn default_history_path() -> StdResult<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "github-finder")
        .context("Failed to determine a data directory for the search history")?;

    Ok(project_dirs.data_dir().join("history.json"))
}

fn render_outcome(outcome: &SearchOutcome) {
    let profile = outcome.profile();
    println!("{} ({})", profile.display_name(), profile.login());
    println!("  {}", profile.bio());
    println!(
        "  Followers: {}  Following: {}  Public repositories: {}",
        format_count(profile.followers().into()),
        format_count(profile.following().into()),
        format_count(profile.public_repositories().into()),
    );
    println!("  Location: {}", profile.location());
    println!("  Company: {}", profile.company());
    println!("  Website: {}", profile.website_url());
    println!("  {}", format_join_date(profile.joined_at()));
    println!("  Avatar: {}", profile.avatar_url());
    println!("  {}", profile.profile_url());

    if outcome.repositories().is_empty() {
        return;
    }
    println!();
    println!("Recently updated repositories:");
    for repository in outcome.repositories() {
        let visibility = if repository.is_private() {
            " [private]"
        } else {
            ""
        };
        println!(
            "  {}{} ({}) - {} stars, {} forks",
            repository.name(),
            visibility,
            repository.language().unwrap_or("n/a"),
            format_count(repository.stars().into()),
            format_count(repository.forks().into()),
        );
        if let Some(description) = repository.description() {
            println!("    {description}");
        }
        println!("    {}", repository.url());
    }
}

async fn render_history(history_store: &dyn HistoryStore) {
    let history = match history_store.load().await {
        Ok(history) => history,
        Err(e) => {
            debug!("Failed to load the search history for display: {e}");
            return;
        }
    };
    if history.is_empty() {
        return;
    }
    println!();
    println!("Recent searches: {}", history.entries().join(", "));
}
