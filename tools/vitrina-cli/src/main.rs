//! Vitrina CLI — Command-line interface for catalogue sharing and export.
//!
//! Usage:
//!   vitrina init <NAME>            Create a new catalogue bundle
//!   vitrina add <CATALOGUE>        Add an item to a catalogue
//!   vitrina items <CATALOGUE>      List catalogue items
//!   vitrina info <CATALOGUE>       Show catalogue information
//!   vitrina validate <CATALOGUE>   Validate a catalogue bundle
//!   vitrina share <CATALOGUE>      Share selected items
//!   vitrina save <CATALOGUE>       Save selected items into a gallery album
//!   vitrina compose <CATALOGUE>    Compose cards into the bundle's exports
//!   vitrina check                  Check delivery capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "vitrina",
    about = "Catalogue sharing: compose price cards and deliver them anywhere",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new catalogue bundle
    Init {
        /// Catalogue name
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Organization the catalogue belongs to
        #[arg(long, default_value = "Unnamed")]
        organization: String,

        /// Currency symbol for rendered prices
        #[arg(long, default_value = "$")]
        currency: String,
    },

    /// Add an item to a catalogue
    Add {
        /// Path to the catalogue bundle
        path: PathBuf,

        /// Item display name
        #[arg(long)]
        name: String,

        /// Item price in catalogue currency units
        #[arg(long)]
        price: f64,

        /// Absolute URL of the item photo
        #[arg(long)]
        image_url: String,

        /// Optional item description
        #[arg(long)]
        description: Option<String>,

        /// Explicit item id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// List catalogue items
    Items {
        /// Path to the catalogue bundle
        path: PathBuf,

        /// Case-insensitive name/description filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show catalogue information
    Info {
        /// Path to the catalogue bundle
        path: PathBuf,
    },

    /// Validate a catalogue bundle
    Validate {
        /// Path to the catalogue bundle
        path: PathBuf,
    },

    /// Download, compose, and hand selected items to the share sheet
    Share {
        /// Path to the catalogue bundle
        path: PathBuf,

        /// Comma-separated item ids to share (all items when omitted)
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,

        /// Share the downloaded photos untouched instead of composed cards
        #[arg(long)]
        plain: bool,

        /// Optional sheet title
        #[arg(long)]
        title: Option<String>,

        /// Optional message accompanying the files
        #[arg(long)]
        message: Option<String>,

        /// Route to a single named share target
        #[arg(long)]
        target: Option<String>,
    },

    /// Download, compose, and save selected items into a gallery album
    Save {
        /// Path to the catalogue bundle
        path: PathBuf,

        /// Comma-separated item ids to save (all items when omitted)
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,

        /// Save the downloaded photos untouched instead of composed cards
        #[arg(long)]
        plain: bool,

        /// Album to save into (config default when omitted)
        #[arg(long)]
        album: Option<String>,
    },

    /// Compose cards into the bundle's exports directory
    Compose {
        /// Path to the catalogue bundle
        path: PathBuf,

        /// Comma-separated item ids to compose (all items when omitted)
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,

        /// JPEG quality override (1-100)
        #[arg(long)]
        quality: Option<u8>,
    },

    /// Check delivery capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = vitrina_common::AppConfig::load();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    vitrina_common::logging::init_logging(&vitrina_common::config::LoggingConfig {
        level: log_level,
        json: config.logging.json,
        file: config.logging.file.clone(),
    });

    match cli.command {
        Commands::Init {
            name,
            output,
            organization,
            currency,
        } => commands::init::run(name, output, organization, currency),
        Commands::Add {
            path,
            name,
            price,
            image_url,
            description,
            id,
        } => commands::add::run(path, name, price, image_url, description, id),
        Commands::Items { path, search } => commands::items::run(path, search),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Share {
            path,
            items,
            plain,
            title,
            message,
            target,
        } => commands::share::run(&config, path, items, plain, title, message, target).await,
        Commands::Save {
            path,
            items,
            plain,
            album,
        } => commands::save::run(&config, path, items, plain, album).await,
        Commands::Compose {
            path,
            items,
            quality,
        } => commands::compose::run(&config, path, items, quality).await,
        Commands::Check => commands::check::run(&config),
    }
}
