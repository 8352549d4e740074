//! Catsearch CLI
//!
//! Launches the terminal or desktop catalog browser, or runs a single search
//! and prints the result.

use catsearch::view::CardView;
use catsearch::{AppConfig, CatsearchError, HttpSearchClient, Overrides, SearchClient};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Config file read from the working directory when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "catsearch.toml";

/// Catsearch - search-as-you-type product catalog browser
///
/// Results update while you type; scrolling to the last card loads the
/// next page.
#[derive(Parser)]
#[command(name = "catsearch")]
#[command(author = "Catsearch Contributors")]
#[command(version)]
#[command(about = "Search-as-you-type product catalog browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Search backend root URL (requests go to {base-url}/search)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Products per page (1-250)
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Delay after the last keystroke before searching, in milliseconds
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    /// Log file for the interactive front ends
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse in the terminal (default)
    Tui {
        /// Query to search on startup
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Browse in a desktop window
    Gui {
        /// Query to search on startup
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Fetch one page of results and print it
    Search {
        /// Search query; empty searches everything (use -- before a query starting with -)
        #[arg(allow_hyphen_values = true, default_value = "")]
        query: String,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Print raw JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> catsearch::Result<()> {
    let command = cli.command.unwrap_or(Commands::Tui { query: None });
    let initial_query = match &command {
        Commands::Tui { query } | Commands::Gui { query } => query.clone(),
        Commands::Search { .. } => None,
    };

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = AppConfig::load_from(&config_path)?
        .with_overrides(Overrides {
            base_url: cli.base_url,
            page_size: cli.page_size,
            debounce_ms: cli.debounce_ms,
            initial_query,
            log_file: cli.log_file,
        })
        .validate()?;

    match command {
        Commands::Tui { .. } => {
            catsearch::logging::init_file(config.log_file.as_deref())?;
            let client = build_client(&config)?;
            catsearch::tui::run(config.search, client)
        }
        Commands::Gui { .. } => {
            catsearch::logging::init_file(config.log_file.as_deref())?;
            let client = build_client(&config)?;
            catsearch::gui::run(config.search, client)
        }
        Commands::Search { query, page, json } => {
            catsearch::logging::init_stderr();
            cmd_search(&config, &query, page, json)
        }
    }
}

fn build_client(config: &AppConfig) -> catsearch::Result<Arc<dyn SearchClient>> {
    let client = HttpSearchClient::new(config.search.base_url.clone())?;
    Ok(Arc::new(client))
}

/// Search command implementation
fn cmd_search(config: &AppConfig, query: &str, page: u32, json: bool) -> catsearch::Result<()> {
    if page == 0 {
        return Err(CatsearchError::Config("page numbers start at 1".to_string()));
    }
    let client = HttpSearchClient::new(config.search.base_url.clone())?;
    let page_size = config.search.page_size;

    let spinner = if json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Searching {}...", config.search.base_url));
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    };

    let result = client.search(query, page, page_size);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let results = result?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "query": query,
                "page": page,
                "pageSize": page_size,
                "totalFound": results.total_found,
                "items": results.items,
            })
        );
        return Ok(());
    }

    if results.items.is_empty() {
        if query.trim().is_empty() {
            println!("{}", style("No products found.").dim());
        } else {
            println!("{}", style(format!("No products found for \"{}\".", query)).dim());
        }
        return Ok(());
    }

    let first = (page as u64 - 1) * page_size as u64;
    for (i, product) in results.items.iter().enumerate() {
        let card = CardView::from_product(product);
        println!(
            "{:>4}. {}  {}  {}  {}",
            first + i as u64 + 1,
            style(&card.title).bold(),
            style(&card.price).cyan(),
            style(&card.category).dim(),
            card.stock.label(),
        );
    }

    let shown = first + results.items.len() as u64;
    println!();
    println!(
        "{} {} of {} products (page {})",
        style("→").cyan().bold(),
        shown.min(results.total_found),
        results.total_found,
        page
    );
    if shown < results.total_found {
        println!("  next: catsearch search {:?} --page {}", query, page + 1);
    }

    Ok(())
}
