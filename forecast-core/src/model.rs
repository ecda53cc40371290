use serde::Deserialize;

/// Coordinates and horizon for one forecast fetch.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Forecast horizon in whole days, starting today.
    pub forecast_days: u8,
}

impl ForecastRequest {
    /// Today plus the three selectable ahead days.
    pub const DEFAULT_FORECAST_DAYS: u8 = 4;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, forecast_days: Self::DEFAULT_FORECAST_DAYS }
    }
}

/// One decoded Open-Meteo hourly forecast response.
///
/// Only the fields this application consumes are modeled; everything else in
/// the response body is ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub hourly: HourlySequences,
}

/// The three parallel hourly sequences, one entry per hour from the start of
/// the requested horizon. The field names are fixed by the Open-Meteo API.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlySequences {
    pub temperature_2m: Vec<f64>,
    pub relative_humidity_2m: Vec<u8>,
    pub cloud_cover: Vec<u8>,
}

/// The physical quantities tracked per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Temperature,
    Humidity,
    CloudCover,
}

impl Quantity {
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::Temperature => "Temperature",
            Quantity::Humidity => "Humidity",
            Quantity::CloudCover => "Cloud cover",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Temperature => "°C",
            Quantity::Humidity | Quantity::CloudCover => "%",
        }
    }

    pub const fn all() -> &'static [Quantity] {
        &[Quantity::Temperature, Quantity::Humidity, Quantity::CloudCover]
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which day of the fetched horizon to derive a screen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOffset {
    Today,
    Tomorrow,
    DayAfter,
}

impl DayOffset {
    /// Hour offset of this day's first entry in the combined series.
    pub fn hours(&self) -> usize {
        match self {
            DayOffset::Today => 0,
            DayOffset::Tomorrow => 24,
            DayOffset::DayAfter => 48,
        }
    }

    /// Days ahead of today.
    pub fn days_ahead(&self) -> u64 {
        (self.hours() / 24) as u64
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayOffset::Today => "today",
            DayOffset::Tomorrow => "tomorrow",
            DayOffset::DayAfter => "the day after tomorrow",
        }
    }

    pub const fn all() -> &'static [DayOffset] {
        &[DayOffset::Today, DayOffset::Tomorrow, DayOffset::DayAfter]
    }
}

impl TryFrom<u8> for DayOffset {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DayOffset::Today),
            1 => Ok(DayOffset::Tomorrow),
            2 => Ok(DayOffset::DayAfter),
            _ => Err(anyhow::anyhow!(
                "Unknown day '{value}'. Supported days: 0 (today), 1 (tomorrow), 2 (day after tomorrow)."
            )),
        }
    }
}
