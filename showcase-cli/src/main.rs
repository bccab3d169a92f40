mod settings;

use clap::{Parser, Subcommand, ValueEnum};
use settings::{FileConfig, Settings};
use showcase::display::{descriptor_badge, summary_line};
use showcase::prelude::*;
use showcase::fallback_repositories;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Resolve the repositories showcased on a portfolio page")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// GitHub access token (overrides GITHUB_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve with the configured strategy
    Show {
        /// Account handle (defaults to the configured one)
        handle: Option<String>,
    },
    /// Pinned repositories, falling back to the embedded list
    Pinned {
        /// Account handle (defaults to the configured one)
        handle: Option<String>,
    },
    /// Public repositories ranked by stars
    Top {
        /// Account handle (defaults to the configured one)
        handle: Option<String>,
    },
    /// Print the embedded fallback list
    Fallback,
    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file, |key| std::env::var(key).ok(), cli.token.clone())?;
    debug!(handle = %settings.handle, strategy = ?settings.strategy, "Loaded settings");

    match cli.command {
        Commands::Show { handle } => {
            let handle = handle.unwrap_or_else(|| settings.handle.clone());
            show_resolution(&settings, settings.strategy, &handle, cli.format).await?;
        }
        Commands::Pinned { handle } => {
            let handle = handle.unwrap_or_else(|| settings.handle.clone());
            show_resolution(&settings, ResolutionStrategy::Pinned, &handle, cli.format).await?;
        }
        Commands::Top { handle } => {
            let handle = handle.unwrap_or_else(|| settings.handle.clone());
            show_resolution(&settings, ResolutionStrategy::TopStarred, &handle, cli.format)
                .await?;
        }
        Commands::Fallback => {
            let resolution = Resolution {
                repositories: fallback_repositories(),
                source: ResolutionSource::FallbackNoCredential,
            };
            print_resolution(&resolution, cli.format)?;
        }
        Commands::Config => {
            print_config(&settings)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("showcase={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn show_resolution(
    settings: &Settings,
    strategy: ResolutionStrategy,
    handle: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = ShowcaseResolver::from_config(&settings.config).with_strategy(strategy);
    let resolution = resolver.resolve_with_source(handle).await;
    info!(
        source = ?resolution.source,
        count = resolution.repositories.len(),
        "Resolution finished"
    );
    print_resolution(&resolution, format)
}

fn print_resolution(
    resolution: &Resolution,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(resolution)?);
        }
        OutputFormat::Text => {
            if resolution.source.is_fallback() {
                println!("(showing fallback repositories: {:?})\n", resolution.source);
            }
            for repo in &resolution.repositories {
                let badge = descriptor_badge(repo)
                    .map(|b| format!(" [{}]", b.css_class()))
                    .unwrap_or_default();
                println!("{}{}", summary_line(repo), badge);
                println!("    {}", repo.description);
                println!("    {}\n", repo.url);
            }
        }
    }
    Ok(())
}

fn print_config(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    println!("handle = {:?}", settings.handle);
    println!(
        "strategy = {:?}",
        match settings.strategy {
            ResolutionStrategy::Pinned => "pinned",
            ResolutionStrategy::TopStarred => "top_starred",
        }
    );
    println!(
        "token = {:?}",
        if settings.config.has_credential() {
            "<configured>"
        } else {
            "<not configured>"
        }
    );
    print!("{}", toml::to_string_pretty(&settings.config)?);
    Ok(())
}
