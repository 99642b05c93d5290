//! PTT Crawler CLI
//!
//! Reads boards and posts from the command line and prints JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ptt_crawler::{
    error::Result,
    models::{Article, Config},
    services::PttCrawler,
};
use serde::Serialize;

/// ptt - PTT board crawler
#[derive(Parser, Debug)]
#[command(name = "ptt", version, about = "Crawl PTT boards and posts")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "ptt.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one listing page of a board
    List {
        board: String,

        /// Page index, 0 for the newest page
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Print each post with a template instead of JSON
        /// (placeholders: {id} {board} {title} {author} {date} {popularity} {url})
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Load a post and print its contents
    Show {
        board: String,
        id: String,

        /// Include image sources found in the body
        #[arg(long)]
        images: bool,

        /// Include links found in the body
        #[arg(long)]
        links: bool,
    },

    /// Stream posts across pages, newest first
    Stream {
        board: String,

        /// Page index to start from, 0 for the newest page
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Stop after this many posts
        #[arg(short, long, default_value_t = 100)]
        limit: usize,

        /// Print each post with a template instead of JSON
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Serialize)]
struct PostOutput<'a> {
    #[serde(flatten)]
    article: &'a Article,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Vec<String>>,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Validate the configuration and build an HTTP-backed crawler.
fn build_crawler(config: &Config) -> Result<PttCrawler> {
    config.validate()?;
    PttCrawler::new(config)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Command::List {
            board,
            page,
            format,
        } => {
            let crawler = build_crawler(&config)?;
            let list = crawler.get_articles(&board, page).await?;
            log::info!(
                "{} articles on {} (previous page {}, next page {})",
                list.len(),
                board,
                list.previous_page,
                list.next_page
            );
            match format {
                Some(template) => {
                    for article in &list.articles {
                        println!("{}", article.format(&template));
                    }
                }
                None => println!("{}", serde_json::to_string_pretty(&list)?),
            }
        }

        Command::Show {
            board,
            id,
            images,
            links,
        } => {
            let crawler = build_crawler(&config)?;
            let mut article = crawler.load_article(&board, &id).await?;
            let images = if images {
                Some(crawler.image_urls(&mut article).await?)
            } else {
                None
            };
            let links = if links {
                Some(crawler.links(&mut article).await?)
            } else {
                None
            };

            let output = PostOutput {
                article: &article,
                images,
                links,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Stream {
            board,
            page,
            limit,
            format,
        } => {
            let crawler = build_crawler(&config)?;
            let mut stream = crawler.stream(&board, page).await?;
            let mut count = 0;

            while count < limit {
                let Some(article) = stream.recv().await else {
                    break;
                };
                match &format {
                    Some(template) => println!("{}", article.format(template)),
                    None => println!("{}", serde_json::to_string(&article)?),
                }
                count += 1;
            }

            stream.cancel();
            log::info!("Streamed {} articles from {}", count, board);
            stream.finish().await?;
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
