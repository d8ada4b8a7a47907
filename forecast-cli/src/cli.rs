use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{Config, SearchLifecycle, SearchPhase, View, provider_from_config};
use inquire::Text;
use std::process::ExitCode;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Multi-day weather forecast CLI")]
pub struct Cli {
    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the forecast service URL and a default city.
    Configure,

    /// Show the forecast for a city, grouped by day.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,

        /// Override the configured forecast service base URL.
        #[arg(long)]
        base_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Show { city, base_url } => show(city, base_url).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let base_url = Text::new("Forecast service base URL:")
        .with_default(cfg.base_url())
        .prompt()
        .context("Failed to read base URL")?;
    cfg.set_base_url(&base_url)?;

    let city = Text::new("Default city (leave empty for none):")
        .with_default(cfg.default_city().unwrap_or_default())
        .prompt()
        .context("Failed to read default city")?;
    cfg.set_default_city(&city);

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: Option<String>, base_url: Option<String>) -> anyhow::Result<ExitCode> {
    let mut cfg = Config::load()?;
    if let Some(url) = base_url.as_deref() {
        cfg.set_base_url(url)?;
    }

    let city = match city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => c.to_string(),
        None => match cfg.default_city() {
            Some(c) => {
                tracing::debug!(city = c, "using configured default city");
                c.to_string()
            }
            None => bail!(
                "No city given and no default city configured.\n\
                 Hint: run `forecast show <city>` or `forecast configure`."
            ),
        },
    };

    let mut lifecycle = SearchLifecycle::new(provider_from_config(&cfg)?);

    let pending = lifecycle.search(&city);
    print!("{}", render::view(&View::of(lifecycle.state())));

    let resolution = pending.resolve().await;
    lifecycle.apply(resolution);

    let state = lifecycle.state();
    print!("{}", render::view(&View::of(state)));

    Ok(exit_code(state.phase))
}

fn exit_code(phase: SearchPhase) -> ExitCode {
    match phase {
        SearchPhase::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
