use crate::{
    Config,
    model::{ForecastRequest, HourlyPayload},
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// Source of hourly forecast payloads.
///
/// Implementations perform their I/O off the caller's critical path and hand
/// back an already-decoded payload; everything downstream of this trait is
/// synchronous and pure.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_hourly(&self, request: &ForecastRequest) -> anyhow::Result<HourlyPayload>;
}

/// Construct the forecast provider selected by config.
///
/// Open-Meteo is the only upstream; config may point it at a self-hosted
/// instance via `api_base`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let provider = match config.api_base.as_deref() {
        Some(base) => OpenMeteoProvider::with_base_url(base.to_owned())?,
        None => OpenMeteoProvider::new()?,
    };

    Ok(Box::new(provider))
}
