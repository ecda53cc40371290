//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Forecast aggregation: hourly series, fixed-stride samples, daily averages
//! - Abstraction over the forecast data source (Open-Meteo)
//! - Session orchestration, configuration and shared domain models
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod model;
pub mod provider;
pub mod session;

pub use aggregate::{AggregateError, DailyAverage, ForecastAggregator, HourlySeries, SampleSet};
pub use config::{Config, HomePlace};
pub use model::{DayOffset, ForecastRequest, HourlyPayload, HourlySequences, Quantity};
pub use provider::{ForecastProvider, provider_from_config};
pub use session::{DayReport, FetchStamp, ForecastSession, QuantityReport};
