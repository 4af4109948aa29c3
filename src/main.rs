//! CLI entry point for postshelf

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postshelf::content::SortKey;

#[derive(Parser)]
#[command(name = "postshelf")]
#[command(version)]
#[command(about = "Author and audit a Jekyll-style collection of blog posts", long_about = None)]
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

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Layout to use (defaults to the configured default_layout)
        #[arg(short, long)]
        layout: Option<String>,

        /// Publication date as YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List posts
    #[command(alias = "ls")]
    List {
        /// Sort key (date, title, id)
        #[arg(short, long, default_value = "date")]
        sort: SortKey,

        /// Reverse the order
        #[arg(short, long)]
        reverse: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Post identifier (file name without extension)
        id: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check posts for duplicate identifiers, missing dates and missing images
    Check,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    postshelf::content::parse_date_string(s).ok_or_else(|| format!("invalid date: {}", s))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postshelf=debug,info"
    } else {
        "postshelf=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            postshelf::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New {
            title,
            layout,
            date,
        } => {
            let site = postshelf::Site::new(&base_dir)?;
            let path =
                postshelf::commands::new::create_post(&site, &title, layout.as_deref(), date)?;
            println!("Created: {:?}", path);
        }

        Commands::List {
            sort,
            reverse,
            json,
        } => {
            let site = postshelf::Site::new(&base_dir)?;
            postshelf::commands::list::run(&site, sort, reverse, json)?;
        }

        Commands::Show { id, json } => {
            let site = postshelf::Site::new(&base_dir)?;
            postshelf::commands::show::run(&site, &id, json)?;
        }

        Commands::Check => {
            let site = postshelf::Site::new(&base_dir)?;
            if !postshelf::commands::check::run(&site)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
