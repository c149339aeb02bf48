use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use reel::app::{App, AppEvent};
use reel::config::Config;
use reel::listings::{
    FileProvider, FilterCriteria, HttpProvider, ListingKind, ListingProvider, PriceRange,
};
use reel::ui;
use reel::util::validate_url_for_open;

/// Get the config directory path (~/.config/reel/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("reel"))
}

/// Parse a property type name for the --kind flag.
fn parse_kind(s: &str) -> Result<ListingKind, String> {
    ListingKind::ALL
        .into_iter()
        .find(|k| k.label().eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            format!(
                "unknown property type '{}' (expected one of: {})",
                s,
                ListingKind::ALL.map(|k| k.label()).join(", ")
            )
        })
}

#[derive(Parser, Debug)]
#[command(name = "reel", about = "Shorts-style terminal browser for rental listings")]
struct Args {
    /// Load listings from a local JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    listings: Option<PathBuf>,

    /// Listing API endpoint (overrides config)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Start with a city filter applied
    #[arg(long)]
    city: Option<String>,

    /// Start with a minimum monthly price filter
    #[arg(long, value_name = "PRICE")]
    min_price: Option<u64>,

    /// Start with a maximum monthly price filter
    #[arg(long, value_name = "PRICE")]
    max_price: Option<u64>,

    /// Start with a property type filter (apartment, studio, ...)
    #[arg(long, value_parser = parse_kind)]
    kind: Option<ListingKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access on Unix; the config may hold a private API endpoint
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(&config_dir) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o700);
            if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to set config directory permissions to 0700"
                );
            }
        }
    }

    let config = Config::load(&config_dir.join("config.toml")).context("Failed to load config")?;

    // Provider resolution: --listings beats config file, which beats API
    let listings_file = args
        .listings
        .clone()
        .or_else(|| config.listings_file.as_ref().map(PathBuf::from));
    let api_url = args.api_url.clone().or_else(|| config.api_url.clone());

    let provider: Arc<dyn ListingProvider> = if let Some(path) = listings_file {
        tracing::info!(path = %path.display(), "Using file provider");
        Arc::new(FileProvider::new(path))
    } else if let Some(url) = api_url {
        if let Err(e) = validate_url_for_open(&url) {
            anyhow::bail!("Invalid API URL: {}", e);
        }
        let base = url::Url::parse(&url).context("Invalid API URL")?;
        let client = HttpProvider::default_client().context("Failed to build HTTP client")?;
        tracing::info!(url = %url, "Using HTTP provider");
        Arc::new(HttpProvider::new(client, base))
    } else {
        eprintln!("Error: no listing source configured.");
        eprintln!();
        eprintln!("Either pass one on the command line:");
        eprintln!("  reel --listings /path/to/listings.json");
        eprintln!("  reel --api-url https://api.example.com/listings");
        eprintln!();
        eprintln!(
            "Or set `listings_file` / `api_url` in {}.",
            config_dir.join("config.toml").display()
        );
        std::process::exit(1);
    };

    let mut app = App::new(provider, &config);
    app.filters = FilterCriteria {
        city: args.city,
        price: PriceRange {
            min: args.min_price,
            max: args.max_price,
        },
        kind: args.kind,
    };

    // Create event channel for background tasks and kick off the first fetch
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    app.spawn_fetch(&event_tx);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
