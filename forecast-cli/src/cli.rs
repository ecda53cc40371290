use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::aggregate::DEFAULT_STRIDE;
use forecast_core::{Config, DayOffset, ForecastRequest, ForecastSession, provider_from_config};
use inquire::{CustomType, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Hourly forecast grid for your coordinates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store default coordinates for `show`.
    Configure {
        /// Latitude in decimal degrees; prompted for when omitted.
        #[arg(long)]
        latitude: Option<f64>,

        /// Longitude in decimal degrees; prompted for when omitted.
        #[arg(long)]
        longitude: Option<f64>,

        /// Display name for the stored place, e.g. "Berlin".
        #[arg(long)]
        label: Option<String>,
    },

    /// Fetch the hourly forecast and print the grid for one day.
    Show {
        /// Latitude in decimal degrees; defaults to the stored location.
        #[arg(long)]
        latitude: Option<f64>,

        /// Longitude in decimal degrees; defaults to the stored location.
        #[arg(long)]
        longitude: Option<f64>,

        /// Day to display: 0 = today, 1 = tomorrow, 2 = day after tomorrow.
        #[arg(long, default_value_t = 0)]
        day: u8,

        /// Hours between grid columns.
        #[arg(long, default_value_t = DEFAULT_STRIDE)]
        stride: usize,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { latitude, longitude, label } => configure(latitude, longitude, label),
            Command::Show { latitude, longitude, day, stride } => {
                show(latitude, longitude, day, stride).await
            }
        }
    }
}

fn configure(
    latitude: Option<f64>,
    longitude: Option<f64>,
    label: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let latitude = match latitude {
        Some(value) => value,
        None => CustomType::<f64>::new("Latitude:")
            .with_help_message("Decimal degrees, e.g. 52.52")
            .prompt()
            .context("Latitude prompt aborted")?,
    };

    let longitude = match longitude {
        Some(value) => value,
        None => CustomType::<f64>::new("Longitude:")
            .with_help_message("Decimal degrees, e.g. 13.42")
            .prompt()
            .context("Longitude prompt aborted")?,
    };

    let label = match label {
        Some(value) => Some(value),
        None => {
            let text = Text::new("Place label (optional):")
                .prompt()
                .context("Label prompt aborted")?;
            let text = text.trim();
            if text.is_empty() { None } else { Some(text.to_string()) }
        }
    };

    config.set_location(latitude, longitude, label)?;
    config.save()?;

    println!("Saved default location to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    latitude: Option<f64>,
    longitude: Option<f64>,
    day: u8,
    stride: usize,
) -> anyhow::Result<()> {
    anyhow::ensure!(stride > 0, "--stride must be at least 1");
    let day = DayOffset::try_from(day)?;

    let config = Config::load()?;
    let (latitude, longitude, place_label) = match (latitude, longitude) {
        (Some(lat), Some(lon)) => (lat, lon, None),
        (None, None) => {
            let place = config.place()?;
            (place.latitude, place.longitude, place.label.clone())
        }
        _ => anyhow::bail!(
            "Pass both --latitude and --longitude, or neither to use the stored location."
        ),
    };

    let provider = provider_from_config(&config)?;
    let mut session = ForecastSession::new(provider);

    let request = ForecastRequest {
        latitude,
        longitude,
        forecast_days: config.horizon_days(),
    };
    session.refresh(&request).await?;

    let report = session.day_report(day, stride).with_context(|| {
        format!(
            "Not enough forecast data for {}.\n\
             Hint: raise `forecast_days` in {}.",
            day.label(),
            Config::config_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string()),
        )
    })?;

    let screen = render::day_screen(
        &report,
        day,
        stride,
        Local::now().date_naive(),
        place_label.as_deref(),
        session.stamp().as_ref(),
    );
    print!("{screen}");

    Ok(())
}
