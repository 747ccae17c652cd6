use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode, Select};
use wxdash_core::{
    Config, ProviderId, SearchOutcome, WeatherProvider, WeatherSession,
    provider::{default_provider_from_config, provider_from_config},
    validate_city,
};

use crate::{dashboard, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxdash", version, about = "Weather dashboard in the terminal")]
pub struct Cli {
    /// Provider to use instead of the configured default ("openweather" or "demo").
    #[arg(long, global = true)]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "demo". Prompts when omitted.
        provider: Option<String>,
    },

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name.
        city: String,

        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,

        /// Print the session state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard with history and autocomplete (default).
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure { provider } => configure(&mut config, provider.as_deref()),
            Command::Show {
                city,
                fahrenheit,
                json,
            } => {
                let provider = resolve_provider(self.provider.as_deref(), &config)?;
                show(WeatherSession::new(provider, config.dashboard), &city, fahrenheit, json).await
            }
            Command::Dashboard => {
                let provider = resolve_provider(self.provider.as_deref(), &config)?;
                println!("Loading weather for {}...", config.dashboard.default_city);
                let session = WeatherSession::start(provider, config.dashboard).await;
                dashboard::run(session).await
            }
        }
    }
}

fn resolve_provider(
    explicit: Option<&str>,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    match explicit {
        Some(name) => provider_from_config(ProviderId::try_from(name)?, config),
        None => default_provider_from_config(config),
    }
}

/// Entry in the interactive provider picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProviderChoice {
    id: ProviderId,
    configured: bool,
}

impl std::fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.configured {
            write!(f, "{} (configured)", self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

fn provider_choices(config: &Config) -> Vec<ProviderChoice> {
    ProviderId::all()
        .iter()
        .map(|&id| ProviderChoice {
            id,
            configured: config.is_provider_configured(id),
        })
        .collect()
}

fn configure(config: &mut Config, provider: Option<&str>) -> anyhow::Result<()> {
    let id = match provider {
        Some(name) => ProviderId::try_from(name)?,
        None => {
            Select::new("Provider to configure:", provider_choices(config))
                .prompt()
                .context("Failed to read provider")?
                .id
        }
    };

    if id.requires_api_key() {
        let api_key = Password::new(&format!("API key for {id}:"))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;

        let api_key = api_key.trim();
        if api_key.is_empty() {
            bail!("API key must not be empty");
        }
        config.upsert_provider_api_key(id, api_key.to_string());
    }

    let current_default = config.default_provider_id().ok();
    if current_default != Some(id) {
        let make_default = Confirm::new(&format!("Use {id} as the default provider?"))
            .with_default(true)
            .prompt()
            .context("Failed to read answer")?;
        if make_default {
            config.set_default_provider(id);
        }
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    session: WeatherSession,
    city: &str,
    fahrenheit: bool,
    json: bool,
) -> anyhow::Result<()> {
    let city = validate_city(city)?;

    if fahrenheit {
        session.toggle_unit();
    }

    let outcome = session.search(city).await;
    let state = session.state();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        if let Some(weather) = &state.current_weather {
            println!("{}", render::current(weather, state.unit));
        }
        if let Some(table) = render::forecast(&state.daily_forecast, state.unit) {
            println!("{table}");
        }
    }

    match (outcome, state.last_error) {
        (SearchOutcome::Completed, _) | (_, None) => Ok(()),
        (_, Some(message)) => bail!(message),
    }
}
