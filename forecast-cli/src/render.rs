//! Pure text formatting for the hourly grid; printing is the caller's job.

use chrono::{Days, NaiveDate};
use forecast_core::aggregate::SAMPLE_SLOTS;
use forecast_core::model::{DayOffset, Quantity};
use forecast_core::session::{DayReport, FetchStamp};

const LABEL_WIDTH: usize = 18;
const CELL_WIDTH: usize = 8;

/// Column headers for the six grid slots, as hours of day.
pub fn slot_headers(stride: usize) -> Vec<String> {
    (0..SAMPLE_SLOTS).map(|i| format!("{:02}:00", (i * stride) % 24)).collect()
}

fn day_title(day: DayOffset) -> &'static str {
    match day {
        DayOffset::Today => "Today",
        DayOffset::Tomorrow => "Tomorrow",
        DayOffset::DayAfter => "Day after tomorrow",
    }
}

fn date_of(day: DayOffset, base_date: NaiveDate) -> NaiveDate {
    base_date.checked_add_days(Days::new(day.days_ahead())).unwrap_or(base_date)
}

fn row(label: &str, cells: &[String], average: &str) -> String {
    let mut line = format!("{label:<LABEL_WIDTH$}");
    for cell in cells {
        line.push_str(&format!("{cell:>CELL_WIDTH$}"));
    }
    line.push_str(&format!("{average:>CELL_WIDTH$}"));
    line.push('\n');
    line
}

fn float_cells(samples: impl Iterator<Item = Option<f64>>) -> Vec<String> {
    samples.map(|s| s.map(|v| format!("{v:.1}")).unwrap_or_default()).collect()
}

fn int_cells(samples: impl Iterator<Item = Option<u8>>) -> Vec<String> {
    samples.map(|s| s.map(|v| v.to_string()).unwrap_or_default()).collect()
}

/// Render one day's screen: heading, fetch stamp, header row, one row per
/// quantity with a trailing daily-average column.
pub fn day_screen(
    report: &DayReport,
    day: DayOffset,
    stride: usize,
    base_date: NaiveDate,
    place_label: Option<&str>,
    stamp: Option<&FetchStamp>,
) -> String {
    let mut out = String::new();

    let date = date_of(day, base_date).format("%d-%m-%Y");
    match place_label {
        Some(place) => out.push_str(&format!("{}, {date} ({place})\n", day_title(day))),
        None => out.push_str(&format!("{}, {date}\n", day_title(day))),
    }

    if let Some(stamp) = stamp {
        out.push_str(&format!(
            "Fetched {} for {:.2}, {:.2}\n",
            stamp.fetched_at.format("%H:%M UTC"),
            stamp.latitude,
            stamp.longitude,
        ));
    }
    out.push('\n');

    out.push_str(&row("", &slot_headers(stride), "Avg"));

    let temperature_label = format!(
        "{} ({})",
        Quantity::Temperature.label(),
        Quantity::Temperature.unit()
    );
    out.push_str(&row(
        &temperature_label,
        &float_cells(report.temperature.samples.iter()),
        &report.temperature.average.to_string(),
    ));

    let humidity_label = format!("{} ({})", Quantity::Humidity.label(), Quantity::Humidity.unit());
    out.push_str(&row(
        &humidity_label,
        &int_cells(report.humidity.samples.iter()),
        &report.humidity.average.to_string(),
    ));

    let cloud_label = format!("{} ({})", Quantity::CloudCover.label(), Quantity::CloudCover.unit());
    out.push_str(&row(
        &cloud_label,
        &int_cells(report.cloud_cover.samples.iter()),
        &report.cloud_cover.average.to_string(),
    ));

    out
}
