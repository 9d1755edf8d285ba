use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dashboard_core::{Banner, Config, Dashboard, api_from_config};
use inquire::Text;
use tokio::runtime::Handle;

use crate::{
    prompt::{CityCompleter, select_by_label},
    render::{render_banner, render_state, render_suggestion},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "City-search weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Interactive search with as-you-type suggestions.
    Search,

    /// List city suggestions for a partial name.
    Suggest {
        /// At least two characters of a city name.
        text: String,
    },

    /// Print the config file location and effective settings.
    Config {
        /// Write the default settings to the config file.
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::debug!(command = ?self.command, "running");

        match self.command {
            Command::Show { city } => {
                let (_, dashboard) = load_dashboard()?;
                show(&dashboard, &city).await
            }
            Command::Search => {
                let (config, dashboard) = load_dashboard()?;
                search(dashboard, &config).await
            }
            Command::Suggest { text } => {
                let (_, dashboard) = load_dashboard()?;
                suggest(&dashboard, &text).await
            }
            Command::Config { init } => show_config(init),
        }
    }
}

fn load_dashboard() -> anyhow::Result<(Config, Arc<Dashboard>)> {
    let config = Config::load()?;
    let dashboard = Dashboard::new(api_from_config(&config)?, &config);
    Ok((config, Arc::new(dashboard)))
}

async fn show(dashboard: &Dashboard, city: &str) -> anyhow::Result<()> {
    eprintln!("Loading...");
    if dashboard.submit_city(city).await?.is_none() {
        bail!("City must not be empty");
    }

    println!("{}", render_state(&dashboard.state()));
    Ok(())
}

async fn suggest(dashboard: &Dashboard, text: &str) -> anyhow::Result<()> {
    let suggestions = dashboard.set_city(text).await;

    if suggestions.is_empty() {
        eprintln!("No suggestions for '{text}'.");
    }
    for s in &suggestions {
        println!("{}", render_suggestion(s));
    }

    Ok(())
}

async fn search(dashboard: Arc<Dashboard>, config: &Config) -> anyhow::Result<()> {
    let banner = Banner::start(&config.banner);
    let runtime = Handle::current();

    loop {
        let completer = CityCompleter::new(Arc::clone(&dashboard), runtime.clone());
        let answer = tokio::task::block_in_place(|| {
            Text::new("City:")
                .with_placeholder("Enter city")
                .with_help_message("type 2+ letters for suggestions, enter to search, esc to quit")
                .with_autocomplete(completer)
                .prompt_skippable()
        })
        .context("Failed to read city from terminal")?;

        let Some(answer) = answer.filter(|a| !a.trim().is_empty()) else {
            break;
        };

        println!("Loading...");
        let outcome = if select_by_label(&dashboard, &answer).is_some() {
            dashboard.fetch_weather().await
        } else {
            dashboard.submit_city(&answer).await
        };
        // the error message is part of the state rendered below
        if let Err(err) = outcome {
            tracing::debug!(city = %answer, error = %err.detail(), "search failed");
        }

        println!("{}", render_state(&dashboard.state()));
        if let Some(line) = render_banner(&banner) {
            println!("\n{line}");
        }
        println!();
    }

    banner.dispose();
    Ok(())
}

fn show_config(init: bool) -> anyhow::Result<()> {
    let path = if init {
        let path = Config::default().save()?;
        println!("Wrote default config to {}", path.display());
        path
    } else {
        Config::config_file_path()?
    };

    let config = Config::load()?;
    println!("# {}\n{}", path.display(), config.to_toml()?);
    Ok(())
}
