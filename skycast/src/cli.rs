use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, Resolution, WeatherSession, provider_from_config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::server::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather by city name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Read city names from stdin and keep the display up to date.
    Browse,

    /// Run the HTTP server.
    Serve {
        /// Listen address; overrides the config file and SKYCAST_BIND.
        #[arg(long)]
        bind: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::Browse => browse().await,
            Command::Serve { bind } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let addr = bind.unwrap_or(config.bind);
                server::serve(AppState { provider }, &addr).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    info!(path = %path.display(), "saved configuration");
    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let provider = provider_from_config(&Config::load()?)?;
    let mut session = WeatherSession::new(provider);

    session.navigate(Some(city));
    session.next_update().await;

    println!("{}", session.render());
    Ok(())
}

async fn browse() -> anyhow::Result<()> {
    let provider = provider_from_config(&Config::load()?)?;
    let mut session = WeatherSession::new(provider);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a city and press Enter. An empty line clears, Ctrl-D quits.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                session.navigate(Some(&line));
                println!("{}", session.render());
            }
            resolution = session.next_update(), if session.in_flight() > 0 => {
                if resolution == Some(Resolution::Applied) {
                    println!("{}", session.render());
                }
            }
        }
    }

    Ok(())
}
