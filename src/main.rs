use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};

use sharefeed::draft::{DraftInput, DraftShelf};
use sharefeed::logging::init_logging;
use sharefeed::{ClientConfig, FeedContext, FeedSort, QueryPolicy};

#[derive(Parser)]
#[command(name = "sharefeed")]
#[command(about = "Fetch shared-post feeds and report engagement events", long_about = None)]
struct Cli {
    /// BFF base URL; overrides SHAREFEED_BFF_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Viewed,
    Bookmarked,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one feed (mock data if the BFF is unavailable)
    Feed {
        #[arg(short, long, default_value = "recommended", value_parser = parse_sort)]
        sort: FeedSort,
        /// Print the normalized JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Report an engagement event
    Event {
        #[arg(short, long, value_enum)]
        kind: Kind,
        #[arg(short, long)]
        content_id: String,
        #[arg(short, long, value_parser = parse_sort)]
        sort: FeedSort,
        /// Extra metadata as key=value; values that parse as JSON keep their type
        #[arg(long = "meta", value_parser = parse_meta)]
        meta: Vec<(String, Value)>,
    },
    /// Compose a local draft and show it ahead of the latest feed
    Draft {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        media: Option<String>,
    },
}

fn parse_sort(s: &str) -> Result<FeedSort, String> {
    s.parse()
}

fn parse_meta(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut config = ClientConfig::from_env().context("Failed to read client configuration")?;
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }
    let ctx = Arc::new(
        FeedContext::from_config(&config, QueryPolicy::default())
            .context("Failed to build HTTP client")?,
    );

    match cli.command {
        Commands::Feed { sort, json } => {
            let feed = ctx.feed(sort).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&feed)?);
            } else {
                let source = if feed.cache_ttl_seconds == 0.0 { " (not cacheable)" } else { "" };
                println!("{} feed: {} items{}", sort, feed.items.len(), source);
                for item in &feed.items {
                    println!(
                        "  - [{}] {} by {} ({} views, {} bookmarks, {:.1}★)",
                        item.id,
                        item.title,
                        item.author,
                        item.engagement.views,
                        item.engagement.bookmarks,
                        item.engagement.rating
                    );
                }
            }
        }
        Commands::Event {
            kind,
            content_id,
            sort,
            meta,
        } => {
            let metadata = if meta.is_empty() {
                None
            } else {
                Some(meta.into_iter().collect::<Map<String, Value>>())
            };
            let result = match kind {
                Kind::Viewed => ctx.track_view(&content_id, sort, metadata).await,
                Kind::Bookmarked => ctx.track_bookmark(&content_id, sort, metadata).await,
            };
            match result {
                Ok(()) => println!("✓ Event reported for {}", content_id),
                Err(e) => {
                    eprintln!("✗ Failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Draft {
            title,
            body,
            topic,
            media,
        } => {
            let mut shelf = DraftShelf::new();
            let draft = shelf
                .publish(&DraftInput {
                    title,
                    body,
                    topic,
                    media_url: media,
                })
                .context("Draft rejected")?;
            println!("Published \"{}\" as {}", draft.title, draft.id);

            let fetched = ctx.items(FeedSort::Latest).await;
            for item in shelf.displayed_items(FeedSort::Latest, &fetched) {
                println!("  - [{}] {}", item.id, item.title);
            }
        }
    }

    Ok(())
}
