//! ioi-scoreboard - Live IOI scoreboard dashboard for the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use ioi_scoreboard::commands::{CountriesCommand, ShowCommand, WatchCommand};
use ioi_scoreboard::config::{Config, FetchMode, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ioi-scoreboard",
    version,
    about = "Live IOI scoreboard dashboard",
    long_about = "Fetches the IOI live ranking page, ranks countries by total score and follows one delegation's contestants."
)]
struct Cli {
    /// Scoreboard page URL
    #[arg(long, global = true, env = "SCOREBOARD_URL")]
    url: Option<String>,

    /// Fetch mode (http, render)
    #[arg(short, long, global = true, env = "SCOREBOARD_MODE")]
    mode: Option<FetchMode>,

    /// Country to follow
    #[arg(long, global = true, env = "SCOREBOARD_COUNTRY")]
    country: Option<String>,

    /// Contestant IDs to follow instead of the whole country (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    contestants: Option<Vec<String>>,

    /// Number of countries in the top ranking
    #[arg(short, long, global = true)]
    top: Option<usize>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SCOREBOARD_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the scoreboard once
    #[command(alias = "s")]
    Show,

    /// Keep the scoreboard on screen, refreshing periodically
    #[command(alias = "w")]
    Watch {
        /// Seconds between refreshes (10-120)
        #[arg(short, long, env = "SCOREBOARD_INTERVAL")]
        interval: Option<u64>,
    },

    /// List known delegation codes
    Countries,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(url) = cli.url {
        config.url = url;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(country) = cli.country {
        config.focus_country = country;
    }
    if let Some(contestants) = cli.contestants {
        config.focus_contestants = contestants;
    }
    if let Some(top) = cli.top {
        config.top_countries = top;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Show => {
            let cmd = ShowCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Watch { interval } => {
            if let Some(secs) = interval {
                config.refresh_secs = secs;
            }

            let cmd = WatchCommand::new(config);
            cmd.execute().await?;
        }

        Commands::Countries => {
            let cmd = CountriesCommand::new(config.format);
            println!("{}", cmd.execute());
        }
    }

    Ok(())
}
