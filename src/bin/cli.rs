//! Kirundi Overview CLI
//!
//! Command-line interface for one-shot operations:
//! - Render the page to a static HTML file
//! - Fetch and print the monthly series
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use kirundi_overview::chart::{format_month_year, transform};
use kirundi_overview::config::{generate_default_config, Config};
use kirundi_overview::logging;
use kirundi_overview::overview::OverviewClient;
use kirundi_overview::page::PageComposer;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "kirundi-overview-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Kirundi NLP overview page tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overview endpoint URL, overriding config and OVERVIEW_API_URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the overview once and write the full HTML page
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch the overview once and print the monthly series
    Fetch {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { output } => {
            let config = load_config(cli.config.as_deref(), cli.endpoint)?;
            let client = OverviewClient::new(config.overview.client_config())
                .context("Failed to create overview client")?;
            let content = config.page.load_content()?;
            let composer = PageComposer::new(Arc::new(client), content);
            let html = composer.render().await?;

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &html)?;
                    println!("Page written to {:?} ({} bytes)", path, html.len());
                }
                None => print!("{}", html),
            }
        }

        Commands::Fetch { format } => {
            let config = load_config(cli.config.as_deref(), cli.endpoint)?;
            let client = OverviewClient::new(config.overview.client_config())
                .context("Failed to create overview client")?;
            let stats = client.fetch().await?;
            let series = transform(&stats.article_counts);

            match format.as_str() {
                "json" => {
                    let body = serde_json::json!({
                        "total_articles": stats.total_articles,
                        "chart": series,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                _ => {
                    println!("{:<12} {:>10}", "Month", "Articles");
                    println!("{}", "-".repeat(23));
                    for point in &series {
                        println!("{:<12} {:>10}", format_month_year(&point.date), point.articles);
                    }
                    println!("{}", "-".repeat(23));
                    println!("{:<12} {:>10}", "Total", stats.total_articles);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", config),
            }
        }
    }

    Ok(())
}

/// Load, override and validate configuration, then start logging
fn load_config(path: Option<&Path>, endpoint: Option<String>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(endpoint) = endpoint {
        config.overview.endpoint_url = endpoint;
    }

    logging::init(&config.logging);
    config.validate()?;
    Ok(config)
}
