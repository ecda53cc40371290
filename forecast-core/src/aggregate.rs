//! Turns flat hourly series into the derived views the grid renders:
//! fixed-stride point samples, first-day averages, and per-day windows.

use thiserror::Error;

use crate::model::HourlySequences;

/// Entries that make up one day of hourly data.
pub const DAY_HOURS: usize = 24;

/// Number of grid columns; the grid always renders exactly this many slots.
pub const SAMPLE_SLOTS: usize = 6;

/// Default hours between grid columns (00:00, 04:00, ..., 20:00).
pub const DEFAULT_STRIDE: usize = 4;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    #[error(
        "hourly sequences differ in length: temperature {temperature}, \
         humidity {humidity}, cloud cover {cloud_cover}"
    )]
    MalformedPayload { temperature: usize, humidity: usize, cloud_cover: usize },

    #[error("window at hour offset {offset} is out of range for a series of {len} entries")]
    OutOfRange { offset: usize, len: usize },
}

/// Ordered hourly readings for one quantity, indexed by hour offset from the
/// start of the fetched horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries<T> {
    values: Vec<T>,
}

impl<T: Copy + Into<f64>> HourlySeries<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn from_values(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    fn extend_from(&mut self, more: &[T]) {
        self.values.extend_from_slice(more);
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    /// Point samples at indices `0, stride, 2*stride, ...`.
    ///
    /// Always yields [`SAMPLE_SLOTS`] slots; an index past the end of the
    /// series is a blank slot, never an error. `stride` must be positive.
    pub fn sample(&self, stride: usize) -> SampleSet<T> {
        let mut slots = [None; SAMPLE_SLOTS];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = self.values.get(i * stride).copied();
        }
        SampleSet { slots }
    }

    /// Arithmetic mean of the first [`DAY_HOURS`] entries.
    ///
    /// Entries at index 24 and beyond never participate, however long the
    /// series has grown; averaging a later day goes through [`Self::window`]
    /// first. Below 24 entries the result is the "N/A" sentinel.
    pub fn average(&self) -> DailyAverage {
        if self.values.len() < DAY_HOURS {
            return DailyAverage::InsufficientData;
        }

        let sum: f64 = self.values[..DAY_HOURS].iter().map(|v| (*v).into()).sum();
        DailyAverage::Value(sum / DAY_HOURS as f64)
    }

    /// The contiguous 24-entry slice starting at `offset`, as its own series.
    ///
    /// Fails with [`AggregateError::OutOfRange`] when the series is too short;
    /// a window is never silently truncated.
    pub fn window(&self, offset: usize) -> Result<HourlySeries<T>, AggregateError> {
        let end = offset.saturating_add(DAY_HOURS);
        if self.values.len() < end {
            return Err(AggregateError::OutOfRange { offset, len: self.values.len() });
        }

        Ok(HourlySeries { values: self.values[offset..end].to_vec() })
    }
}

/// Exactly [`SAMPLE_SLOTS`] grid values; `None` marks a slot with no data yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSet<T> {
    slots: [Option<T>; SAMPLE_SLOTS],
}

impl<T: Copy> SampleSet<T> {
    pub fn slots(&self) -> &[Option<T>; SAMPLE_SLOTS] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.slots.iter().copied()
    }
}

/// Mean over one day of readings, or the sentinel shown while the first day
/// is still incomplete. Displays as a 2-decimal value or `N/A`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DailyAverage {
    Value(f64),
    InsufficientData,
}

impl DailyAverage {
    pub fn value(&self) -> Option<f64> {
        match self {
            DailyAverage::Value(v) => Some(*v),
            DailyAverage::InsufficientData => None,
        }
    }
}

impl std::fmt::Display for DailyAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DailyAverage::Value(v) => write!(f, "{v:.2}"),
            DailyAverage::InsufficientData => f.write_str("N/A"),
        }
    }
}

/// Owns the three parallel series accumulated over one screen session.
///
/// State is explicit and caller-owned: a new session starts from
/// [`ForecastAggregator::new`] or [`ForecastAggregator::clear`], never from
/// process-wide storage.
#[derive(Debug, Clone, Default)]
pub struct ForecastAggregator {
    temperature: HourlySeries<f64>,
    humidity: HourlySeries<u8>,
    cloud_cover: HourlySeries<u8>,
}

impl ForecastAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one payload's sequences to the running series, preserving
    /// fetch order, and returns how many hours each series grew by.
    ///
    /// Atomic per call: when the three sequence lengths disagree the payload
    /// is rejected whole and no series changes. Past entries are never
    /// rewritten.
    pub fn ingest(&mut self, hourly: &HourlySequences) -> Result<usize, AggregateError> {
        let temperature = hourly.temperature_2m.len();
        let humidity = hourly.relative_humidity_2m.len();
        let cloud_cover = hourly.cloud_cover.len();

        if temperature != humidity || temperature != cloud_cover {
            return Err(AggregateError::MalformedPayload { temperature, humidity, cloud_cover });
        }

        self.temperature.extend_from(&hourly.temperature_2m);
        self.humidity.extend_from(&hourly.relative_humidity_2m);
        self.cloud_cover.extend_from(&hourly.cloud_cover);

        Ok(temperature)
    }

    pub fn temperature(&self) -> &HourlySeries<f64> {
        &self.temperature
    }

    pub fn humidity(&self) -> &HourlySeries<u8> {
        &self.humidity
    }

    pub fn cloud_cover(&self) -> &HourlySeries<u8> {
        &self.cloud_cover
    }

    /// Common length of the three series.
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// Drops all accumulated hours; call at session start.
    pub fn clear(&mut self) {
        self.temperature.clear();
        self.humidity.clear();
        self.cloud_cover.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequences(hours: usize) -> HourlySequences {
        HourlySequences {
            temperature_2m: (0..hours).map(|h| 10.0 + h as f64 * 0.5).collect(),
            relative_humidity_2m: vec![50; hours],
            cloud_cover: vec![0; hours],
        }
    }

    #[test]
    fn ingest_concatenates_in_fetch_order() {
        let mut agg = ForecastAggregator::new();

        let first = HourlySequences {
            temperature_2m: vec![1.0, 2.0],
            relative_humidity_2m: vec![10, 20],
            cloud_cover: vec![5, 6],
        };
        let second = HourlySequences {
            temperature_2m: vec![3.0],
            relative_humidity_2m: vec![30],
            cloud_cover: vec![7],
        };

        assert_eq!(agg.ingest(&first).unwrap(), 2);
        assert_eq!(agg.ingest(&second).unwrap(), 1);

        assert_eq!(agg.temperature().values(), &[1.0, 2.0, 3.0]);
        assert_eq!(agg.humidity().values(), &[10, 20, 30]);
        assert_eq!(agg.cloud_cover().values(), &[5, 6, 7]);
    }

    #[test]
    fn malformed_payload_is_rejected_atomically() {
        let mut agg = ForecastAggregator::new();
        agg.ingest(&sequences(2)).unwrap();

        let malformed = HourlySequences {
            temperature_2m: vec![0.0; 24],
            relative_humidity_2m: vec![50; 23],
            cloud_cover: vec![0; 24],
        };

        let err = agg.ingest(&malformed).unwrap_err();
        assert_eq!(
            err,
            AggregateError::MalformedPayload { temperature: 24, humidity: 23, cloud_cover: 24 }
        );

        // Nothing from the bad payload landed in any series.
        assert_eq!(agg.len(), 2);
        assert_eq!(agg.humidity().len(), 2);
        assert_eq!(agg.cloud_cover().len(), 2);
    }

    #[test]
    fn sample_always_fills_six_slots() {
        for hours in [0usize, 5, 23, 1000] {
            let series = HourlySeries::from_values((0..hours).map(|h| h as f64).collect());
            let samples = series.sample(DEFAULT_STRIDE);
            assert_eq!(samples.slots().len(), SAMPLE_SLOTS);
        }
    }

    #[test]
    fn sample_blanks_slots_past_series_end() {
        let series = HourlySeries::from_values((0..5).map(|h| h as f64).collect());
        let samples = series.sample(4);

        assert_eq!(samples.slots()[0], Some(0.0));
        assert_eq!(samples.slots()[1], Some(4.0));
        for slot in &samples.slots()[2..] {
            assert_eq!(*slot, None);
        }
    }

    #[test]
    fn sample_respects_stride() {
        let series = HourlySeries::from_values((0..24).collect::<Vec<u8>>());
        let samples = series.sample(2);
        assert_eq!(samples.slots()[5], Some(10));
    }

    #[test]
    fn average_needs_a_full_day() {
        let series = HourlySeries::from_values(vec![1.0; 23]);
        assert_eq!(series.average(), DailyAverage::InsufficientData);
        assert_eq!(series.average().to_string(), "N/A");

        let series = HourlySeries::from_values(vec![1.0; 24]);
        assert_eq!(series.average(), DailyAverage::Value(1.0));
        assert_eq!(series.average().to_string(), "1.00");
    }

    #[test]
    fn average_ignores_entries_past_the_first_day() {
        let mut values = vec![10.0; 24];
        let baseline = HourlySeries::from_values(values.clone()).average();

        values.extend([9000.0; 48]);
        let grown = HourlySeries::from_values(values).average();

        assert_eq!(baseline, grown);
    }

    #[test]
    fn average_promotes_integer_series() {
        let series = HourlySeries::from_values(vec![3u8; 24]);
        assert_eq!(series.average(), DailyAverage::Value(3.0));
    }

    #[test]
    fn window_boundary() {
        let series = HourlySeries::from_values(vec![0.0; 47]);
        assert_eq!(
            series.window(24).unwrap_err(),
            AggregateError::OutOfRange { offset: 24, len: 47 }
        );

        let series = HourlySeries::from_values((0..48).map(|h| h as f64).collect());
        let window = series.window(24).unwrap();
        assert_eq!(window.len(), DAY_HOURS);
        assert_eq!(window.values()[0], 24.0);
        assert_eq!(window.values()[23], 47.0);
    }

    #[test]
    fn window_is_averaged_as_its_own_day() {
        let mut values = vec![0.0; 24];
        values.extend(vec![10.0; 24]);
        let series = HourlySeries::from_values(values);

        let window = series.window(24).unwrap();
        assert_eq!(window.average(), DailyAverage::Value(10.0));
    }

    #[test]
    fn clear_resets_all_series() {
        let mut agg = ForecastAggregator::new();
        agg.ingest(&sequences(24)).unwrap();
        agg.clear();

        assert!(agg.is_empty());
        assert!(agg.humidity().is_empty());
        assert!(agg.cloud_cover().is_empty());
    }

    #[test]
    fn grid_example_end_to_end() {
        let mut agg = ForecastAggregator::new();
        agg.ingest(&sequences(24)).unwrap();

        let samples: Vec<_> = agg.temperature().sample(DEFAULT_STRIDE).iter().flatten().collect();
        assert_eq!(samples, vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0]);

        assert_eq!(agg.temperature().average().to_string(), "15.75");
        assert_eq!(agg.humidity().average().to_string(), "50.00");
        assert_eq!(agg.cloud_cover().average().to_string(), "0.00");
    }
}
