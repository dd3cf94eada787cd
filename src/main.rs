//! CLI entry point for postline

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postline::commands;
use postline::commands::new::NewPost;
use postline::commands::retag::TagFilter;
use postline::content::PostKind;
use postline::feeds::Source;

#[derive(Parser)]
#[command(name = "postline")]
#[command(version)]
#[command(about = "Calendar layout, feed sync and maintenance for a flat-file blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FeedSource {
    Youtube,
    Soundcloud,
    Podcast,
}

impl From<FeedSource> for Source {
    fn from(source: FeedSource) -> Self {
        match source {
            FeedSource::Youtube => Source::YouTube,
            FeedSource::Soundcloud => Source::SoundCloud,
            FeedSource::Podcast => Source::Podcast,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Pull new posts from a feed
    Sync {
        #[arg(value_enum)]
        source: FeedSource,
    },

    /// Show the calendar grid of a year
    #[command(alias = "cal")]
    Calendar {
        /// Year to show (defaults to the selected date's year or the latest year with posts)
        #[arg(short, long)]
        year: Option<i32>,

        /// Selected day, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,

        /// Print layout data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the post timeline
    Timeline {
        /// Print layout data as JSON
        #[arg(long)]
        json: bool,
    },

    /// List site information
    List {
        /// Type of content to list (posts, tags, days, years)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// List every route of the rendered site
    Routes {
        /// Print the route table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Post type (article, video, music, audio)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Tag to add, may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// External link
        #[arg(short, long)]
        url: Option<String>,

        /// File name stem (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Fill in missing front-matter fields (youtube-ids, video-descriptions)
    Backfill { what: String },

    /// Bulk tagging passes
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Remove externalUrl from YouTube video posts
    PruneExternalUrls,

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum TagAction {
    /// Add tags to matching posts
    Add {
        /// Tag to add, may be repeated
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,

        /// Only posts of this type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Only posts from this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Assign broad category tags to every post
    Classify,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postline=debug,info"
    } else {
        "postline=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot read current directory")?,
    };

    if let Commands::Version = cli.command {
        println!("postline version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let site = postline::Site::new(&base_dir)?;

    match cli.command {
        Commands::Sync { source } => {
            commands::sync::run(&site, source.into()).await?;
        }

        Commands::Calendar { year, date, json } => {
            commands::calendar::run(&site, year, date.as_deref(), json)?;
        }

        Commands::Timeline { json } => {
            commands::calendar::timeline(&site, json)?;
        }

        Commands::List { r#type } => {
            commands::list::run(&site, &r#type)?;
        }

        Commands::Routes { json } => {
            commands::routes::run(&site, json)?;
        }

        Commands::New {
            title,
            kind,
            tags,
            url,
            slug,
        } => {
            tracing::info!("Creating new post with title: {}", title);
            let post = NewPost {
                title: &title,
                kind: kind.as_deref().map(PostKind::from_type_field),
                tags: &tags,
                external_url: url.as_deref(),
                slug: slug.as_deref(),
            };
            commands::new::run(&site, &post)?;
        }

        Commands::Backfill { what } => {
            commands::backfill::run(&site, &what).await?;
        }

        Commands::Tag { action } => match action {
            TagAction::Add { tags, kind, year } => {
                let filter = TagFilter {
                    kind: kind.as_deref().map(PostKind::from_type_field),
                    year,
                };
                let updated = commands::retag::add_tags(&site, &tags, &filter)?;
                println!("Tagged {} posts with: {}", updated, tags.join(", "));
            }
            TagAction::Classify => {
                let updated = commands::retag::classify_all(&site)?;
                println!("Tagged {} posts.", updated);
            }
        },

        Commands::PruneExternalUrls => {
            commands::prune::run(&site)?;
        }

        Commands::Version => {}
    }

    Ok(())
}
