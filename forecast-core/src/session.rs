//! Session-scoped fetch orchestration: one `ForecastSession` per screenful
//! of data, owning the accumulated series for its lifetime.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::aggregate::{AggregateError, DailyAverage, ForecastAggregator, SampleSet};
use crate::model::{DayOffset, ForecastRequest};
use crate::provider::ForecastProvider;

/// Recorded after each successful refresh. Coordinates are the ones echoed
/// by the API (it snaps to its grid resolution).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchStamp {
    pub latitude: f64,
    pub longitude: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Samples and average for one quantity on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityReport<T> {
    pub samples: SampleSet<T>,
    pub average: DailyAverage,
}

/// Everything the grid needs for one selected day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayReport {
    pub temperature: QuantityReport<f64>,
    pub humidity: QuantityReport<u8>,
    pub cloud_cover: QuantityReport<u8>,
}

/// Owns a provider and the series accumulated from it.
///
/// All ingestion happens through [`ForecastSession::refresh`], so the
/// ordering invariant of the combined series holds by construction: one
/// logical caller, sequential ingests, chronological payloads.
#[derive(Debug)]
pub struct ForecastSession {
    provider: Box<dyn ForecastProvider>,
    aggregator: ForecastAggregator,
    stamp: Option<FetchStamp>,
}

impl ForecastSession {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self { provider, aggregator: ForecastAggregator::new(), stamp: None }
    }

    /// Fetch a fresh horizon and replace the accumulated series with it.
    ///
    /// The previous series survives a failed fetch or a malformed payload;
    /// the swap happens only once the new data is fully ingested. Returns
    /// the number of hours now held.
    pub async fn refresh(&mut self, request: &ForecastRequest) -> Result<usize> {
        let payload = self.provider.fetch_hourly(request).await.with_context(|| {
            format!(
                "Failed to fetch hourly forecast for {:.4}, {:.4}",
                request.latitude, request.longitude
            )
        })?;

        let mut fresh = ForecastAggregator::new();
        let hours = fresh.ingest(&payload.hourly)?;

        self.aggregator = fresh;
        self.stamp = Some(FetchStamp {
            latitude: payload.latitude,
            longitude: payload.longitude,
            fetched_at: Utc::now(),
        });

        tracing::info!(hours, "forecast session refreshed");

        Ok(hours)
    }

    pub fn aggregator(&self) -> &ForecastAggregator {
        &self.aggregator
    }

    pub fn stamp(&self) -> Option<FetchStamp> {
        self.stamp
    }

    /// Derive the grid for one day.
    ///
    /// Today reads the running series in place, so a partially fetched day
    /// still renders (blank slots, "N/A" average). Ahead days are cut out
    /// with `window` first and fail with [`AggregateError::OutOfRange`]
    /// until the series covers them; the caller keeps those selections
    /// disabled rather than showing a truncated day.
    pub fn day_report(&self, day: DayOffset, stride: usize) -> Result<DayReport, AggregateError> {
        let agg = &self.aggregator;

        match day.hours() {
            0 => Ok(DayReport {
                temperature: QuantityReport {
                    samples: agg.temperature().sample(stride),
                    average: agg.temperature().average(),
                },
                humidity: QuantityReport {
                    samples: agg.humidity().sample(stride),
                    average: agg.humidity().average(),
                },
                cloud_cover: QuantityReport {
                    samples: agg.cloud_cover().sample(stride),
                    average: agg.cloud_cover().average(),
                },
            }),
            offset => {
                let temperature = agg.temperature().window(offset)?;
                let humidity = agg.humidity().window(offset)?;
                let cloud_cover = agg.cloud_cover().window(offset)?;

                Ok(DayReport {
                    temperature: QuantityReport {
                        samples: temperature.sample(stride),
                        average: temperature.average(),
                    },
                    humidity: QuantityReport {
                        samples: humidity.sample(stride),
                        average: humidity.average(),
                    },
                    cloud_cover: QuantityReport {
                        samples: cloud_cover.sample(stride),
                        average: cloud_cover.average(),
                    },
                })
            }
        }
    }
}
