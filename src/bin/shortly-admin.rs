//! CLI administration tool for shortly.
//!
//! Talks to the same Redis store as the server, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts for the URL when omitted)
//! cargo run --bin shortly-admin -- shorten https://example.com/very/long/path
//! cargo run --bin shortly-admin -- shorten https://example.com --code promo2025
//!
//! # Show the stored record and click count of a code
//! cargo run --bin shortly-admin -- inspect promo2025
//!
//! # Check store connectivity
//! cargo run --bin shortly-admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`,
//! and `BASE_URL` for printed short links.

use shortly::application::services::{AllocationService, RedirectService};
use shortly::api::dto::shorten::validate_http_url;
use shortly::config::{Config, mask_connection_string};
use shortly::domain::entities::ShortCode;
use shortly::domain::repositories::MappingStore;
use shortly::infrastructure::store::RedisStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::sync::Arc;

/// CLI tool for managing shortly links.
#[derive(Parser)]
#[command(name = "shortly-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Custom short code (random if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show a code's destination, creation time and clicks, or whether it is free
    Inspect {
        /// Short code to look up
        code: String,
    },

    /// Check store connectivity
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let store = RedisStore::connect(&config.redis_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to Redis at {}",
                mask_connection_string(&config.redis_url)
            )
        })?;
    let store: Arc<dyn MappingStore> = Arc::new(store);

    match cli.command {
        Commands::Shorten { url, code } => shorten(store, &config.base_url, url, code).await?,
        Commands::Inspect { code } => inspect(store, &code).await?,
        Commands::Ping => ping(store).await?,
    }

    Ok(())
}

/// Allocates a short link and prints it.
async fn shorten(
    store: Arc<dyn MappingStore>,
    base_url: &str,
    url: Option<String>,
    code: Option<String>,
) -> Result<()> {
    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to shorten")
            .validate_with(|input: &String| {
                validate_http_url(input).map_err(|_| "Enter an absolute http(s) URL")
            })
            .interact_text()?,
    };

    validate_http_url(&url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;

    let service = AllocationService::new(store);
    let short_code = service
        .allocate(url.clone(), code)
        .await
        .context("Failed to create short link")?;

    println!("{}", "Short link created".green().bold());
    println!("  {} {}", "Short URL:".bright_black(), short_code.short_url(base_url).bright_cyan());
    println!("  {} {}", "Code:".bright_black(), short_code);
    println!("  {} {}", "Destination:".bright_black(), url);

    Ok(())
}

/// Prints the stored record of a code, or reports that the code is free.
async fn inspect(store: Arc<dyn MappingStore>, code: &str) -> Result<()> {
    let taken = store
        .exists(&ShortCode::new(code))
        .await
        .with_context(|| format!("Failed to look up '{}'", code))?;

    if !taken {
        println!("{} {}", code.bold(), "is not allocated (available as a custom code)".yellow());
        return Ok(());
    }

    let service = RedirectService::new(store);
    let record = service
        .stats(code)
        .await
        .with_context(|| format!("Failed to look up '{}'", code))?;

    let created = record
        .created_at_utc()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| record.created_at.to_string());

    println!("{}", format!("Short code {}", record.code).bright_blue().bold());
    println!("  {} {}", "Destination:".bright_black(), record.destination);
    println!("  {} {}", "Created:".bright_black(), created);
    println!("  {} {}", "Clicks:".bright_black(), record.clicks.to_string().yellow());

    Ok(())
}

/// Pings the store.
async fn ping(store: Arc<dyn MappingStore>) -> Result<()> {
    match store.ping().await {
        Ok(()) => {
            println!("{}", "Redis PING ok".green());
            Ok(())
        }
        Err(e) => {
            println!("{}", "Redis PING failed".red());
            Err(e).context("Store health check failed")
        }
    }
}
