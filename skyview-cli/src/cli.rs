use crate::render;
use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use skyview_core::{
    Config, Dashboard, DashboardError, OpenWeatherClient, Submission, UnitSystem, provider,
    resolver,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Unit system for this run, overriding the config ("imperial" or "metric").
    #[arg(long, global = true, value_parser = parse_units)]
    pub units: Option<UnitSystem>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and preferred units.
    Configure,

    /// List the places matching a city name or ZIP code.
    Search {
        /// City name or ZIP code.
        location: String,
    },

    /// Show the weather dashboard for a location.
    Show {
        /// City name or ZIP code.
        location: String,

        /// Pick the Nth match (1-based) instead of prompting when several places match.
        #[arg(long)]
        pick: Option<usize>,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn parse_units(value: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { location } => {
                let config = Config::load()?;
                search(&config, &location).await
            }
            Command::Show {
                location,
                pick,
                json,
            } => {
                let config = Config::load()?;
                let units = self.units.unwrap_or(config.units);
                show(&config, units, &location, pick, json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let units = Select::new("Units:", UnitSystem::all().to_vec())
        .with_starting_cursor(if config.units == UnitSystem::Metric { 1 } else { 0 })
        .prompt()
        .context("Failed to read unit system")?;

    config.set_api_key(api_key.trim().to_string());
    config.units = units;
    config.save_to(&path)?;

    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn search(config: &Config, location: &str) -> anyhow::Result<()> {
    let client = provider::client_from_config(config)?;

    let candidates = resolver::resolve(&client, location)
        .await
        .map_err(|e| user_error(DashboardError::from(e)))?;

    for (i, candidate) in candidates.iter().enumerate() {
        println!(
            "{:>2}. {}  [{:.2}, {:.2}]",
            i + 1,
            candidate,
            candidate.lat,
            candidate.lon
        );
    }
    Ok(())
}

async fn show(
    config: &Config,
    units: UnitSystem,
    location: &str,
    pick: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    tracing::debug!(location, %units, pick, json, "show");
    let client = provider::client_from_config(config)?;
    let mut dash: Dashboard<OpenWeatherClient> = Dashboard::new(client, units);

    let submission = dash.submit(location).await.map_err(user_error)?;
    match submission {
        Submission::Ignored => anyhow::bail!("Enter a city name or ZIP code."),
        Submission::Loaded => {}
        Submission::Choose(count) => {
            let index = match pick {
                Some(n) if (1..=count).contains(&n) => n - 1,
                Some(n) => anyhow::bail!("--pick {n} is out of range; {count} places matched"),
                None => {
                    Select::new("Choose a location", dash.state().candidates().to_vec())
                        .raw_prompt()
                        .context("Failed to read location choice")?
                        .index
                }
            };
            dash.select(index).await.map_err(user_error)?;
        }
    }

    let snapshot = dash
        .state()
        .snapshot()
        .context("No weather data available")?;

    if json {
        let out = serde_json::to_string_pretty(&snapshot.view())
            .context("Failed to serialize weather snapshot")?;
        println!("{out}");
    } else {
        print!("{}", render::dashboard(snapshot));
    }
    Ok(())
}

/// Put the user-facing message first and keep the detailed cause for `{:?}`.
fn user_error(err: DashboardError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}
