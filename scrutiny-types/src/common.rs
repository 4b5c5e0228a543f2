// SPDX-License-Identifier: GPL-3.0-only

//! Value formatters shared by the dashboard views

use num_format::{Locale, ToFormattedString};

use crate::settings::{PoweredOnHoursUnit, TemperatureUnit};

const MS_PER_HOUR: f64 = 3_600_000.0;

const SI_UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const BINARY_UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert a Celsius reading to the requested unit
pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    }
}

/// Format a Celsius reading as a whole number in `unit`, e.g. "81°F".
///
/// Halves round up and thousands are grouped with commas.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit, include_units: bool) -> String {
    let rounded = (convert_temperature(celsius, unit) + 0.5).floor() as i64;
    let number = rounded.to_formatted_string(&Locale::en);

    if include_units {
        format!("{number}{}", unit.suffix())
    } else {
        number
    }
}

/// Unit of a humanized duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 7] = [
        Self::Years,
        Self::Months,
        Self::Weeks,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
    ];

    /// Length in milliseconds; a year is 365.25 days and a month a twelfth of it
    pub fn millis(self) -> f64 {
        match self {
            Self::Years => 31_557_600_000.0,
            Self::Months => 2_629_800_000.0,
            Self::Weeks => 604_800_000.0,
            Self::Days => 86_400_000.0,
            Self::Hours => 3_600_000.0,
            Self::Minutes => 60_000.0,
            Self::Seconds => 1_000.0,
        }
    }

    fn name(self, count: f64) -> &'static str {
        let singular = count == 1.0;
        match self {
            Self::Years if singular => "year",
            Self::Years => "years",
            Self::Months if singular => "month",
            Self::Months => "months",
            Self::Weeks if singular => "week",
            Self::Weeks => "weeks",
            Self::Days if singular => "day",
            Self::Days => "days",
            Self::Hours if singular => "hour",
            Self::Hours => "hours",
            Self::Minutes if singular => "minute",
            Self::Minutes => "minutes",
            Self::Seconds if singular => "second",
            Self::Seconds => "seconds",
        }
    }
}

/// Options for [`humanize_duration`]
#[derive(Debug, Clone, PartialEq)]
pub struct HumanizeOptions {
    /// Units to express the duration in, largest first
    pub units: Vec<DurationUnit>,
    /// Maximum number of non-zero pieces
    pub largest: Option<usize>,
    /// Round pieces to whole numbers, carrying into larger units
    pub round: bool,
}

impl Default for HumanizeOptions {
    fn default() -> Self {
        Self {
            units: DurationUnit::ALL.to_vec(),
            largest: None,
            round: false,
        }
    }
}

impl HumanizeOptions {
    /// Options used by the dashboard device cards
    pub fn card() -> Self {
        Self {
            units: vec![DurationUnit::Years, DurationUnit::Days, DurationUnit::Hours],
            largest: Some(1),
            round: true,
        }
    }
}

fn render_piece(count: f64, unit: DurationUnit) -> String {
    format!("{count} {}", unit.name(count))
}

/// Humanize a duration given in milliseconds, e.g. "1 year, 8 months".
///
/// Every unit but the last holds a whole count; the last keeps the fractional
/// remainder unless `round` is set.
pub fn humanize_duration(millis: f64, options: &HumanizeOptions) -> String {
    let units: &[DurationUnit] = if options.units.is_empty() {
        &DurationUnit::ALL
    } else {
        &options.units
    };

    let mut remaining = millis.abs();
    let mut pieces: Vec<(DurationUnit, f64)> = Vec::with_capacity(units.len());
    for (index, unit) in units.iter().enumerate() {
        let exact = remaining / unit.millis();
        let count = if index + 1 == units.len() {
            exact
        } else {
            exact.floor()
        };
        remaining -= count * unit.millis();
        pieces.push((*unit, count));
    }

    let first_occupied = pieces
        .iter()
        .position(|(_, count)| *count != 0.0)
        .unwrap_or(0);

    if options.round {
        for index in (0..pieces.len()).rev() {
            pieces[index].1 = (pieces[index].1 + 0.5).floor();
            if index == 0 {
                break;
            }

            let (unit, count) = pieces[index];
            let ratio = pieces[index - 1].0.millis() / unit.millis();
            let beyond_largest = options
                .largest
                .is_some_and(|largest| largest.saturating_sub(1) < index - first_occupied.min(index));

            if count % ratio == 0.0 || beyond_largest {
                pieces[index - 1].1 += count / ratio;
                pieces[index].1 = 0.0;
            }
        }
    }

    let mut rendered: Vec<String> = Vec::new();
    for (unit, count) in pieces {
        if count != 0.0 {
            rendered.push(render_piece(count, unit));
        }
        if options.largest == Some(rendered.len()) {
            break;
        }
    }

    if rendered.is_empty() {
        let smallest = units[units.len() - 1];
        return render_piece(0.0, smallest);
    }

    rendered.join(", ")
}

/// Format power-on hours for display
pub fn format_device_hours(
    hours: Option<u64>,
    unit: PoweredOnHoursUnit,
    options: &HumanizeOptions,
) -> String {
    let Some(hours) = hours else {
        return "Unknown".to_string();
    };

    match unit {
        PoweredOnHoursUnit::DeviceHours => format!("{hours} hours"),
        PoweredOnHoursUnit::Humanize => humanize_duration(hours as f64 * MS_PER_HOUR, options),
    }
}

/// Format a byte count with one decimal, e.g. "1.5 KiB" or "1.0 MB"
pub fn format_file_size(bytes: u64, si: bool) -> String {
    let (threshold, units) = if si {
        (1000.0, &SI_UNITS)
    } else {
        (1024.0, &BINARY_UNITS)
    };

    let mut value = bytes as f64;
    if value < threshold {
        return format!("{bytes} B");
    }

    let mut step = 0;
    value /= threshold;
    // Promote while the displayed value would reach the next unit
    while (value * 10.0).round() / 10.0 >= threshold && step < units.len() - 1 {
        value /= threshold;
        step += 1;
    }

    format!("{value:.1} {}", units[step])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }

    #[test]
    fn temperature_rounds_and_appends_unit() {
        assert_eq!(format_temperature(27.0, TemperatureUnit::Fahrenheit, true), "81°F");
        assert_eq!(format_temperature(26.67, TemperatureUnit::Celsius, true), "27°C");
        assert_eq!(format_temperature(0.0, TemperatureUnit::Fahrenheit, true), "32°F");
        assert_eq!(format_temperature(100.0, TemperatureUnit::Fahrenheit, false), "212");
        assert_eq!(format_temperature(35.5, TemperatureUnit::Celsius, false), "36");
    }

    #[test]
    fn temperature_groups_thousands() {
        assert_eq!(format_temperature(1234.0, TemperatureUnit::Celsius, false), "1,234");
    }

    #[test]
    fn unknown_temperature_unit_is_celsius() {
        let unit = TemperatureUnit::from_key("kelvin");
        assert_eq!(format_temperature(40.0, unit, true), "40°C");
    }

    #[test]
    fn device_hours_formats() {
        let options = HumanizeOptions::default();
        assert_eq!(
            format_device_hours(Some(12345), PoweredOnHoursUnit::DeviceHours, &options),
            "12345 hours"
        );
        assert_eq!(
            format_device_hours(Some(168), PoweredOnHoursUnit::Humanize, &options),
            "1 week"
        );
        assert_eq!(
            format_device_hours(None, PoweredOnHoursUnit::Humanize, &options),
            "Unknown"
        );
        assert_eq!(
            format_device_hours(None, PoweredOnHoursUnit::DeviceHours, &options),
            "Unknown"
        );
    }

    #[test]
    fn humanize_lists_every_occupied_unit() {
        let options = HumanizeOptions::default();
        assert_eq!(humanize_duration(25.0 * MS_PER_HOUR, &options), "1 day, 1 hour");
        assert_eq!(humanize_duration(90_000.0, &options), "1 minute, 30 seconds");
        assert_eq!(humanize_duration(1_500.0, &options), "1.5 seconds");
        assert_eq!(humanize_duration(0.0, &options), "0 seconds");
    }

    #[test]
    fn card_options_round_to_largest_unit() {
        let card = HumanizeOptions::card();
        assert_eq!(
            format_device_hours(Some(15273), PoweredOnHoursUnit::Humanize, &card),
            "2 years"
        );
        assert_eq!(
            format_device_hours(Some(8760), PoweredOnHoursUnit::Humanize, &card),
            "365 days"
        );
        assert_eq!(
            format_device_hours(Some(8766), PoweredOnHoursUnit::Humanize, &card),
            "1 year"
        );
        assert_eq!(
            format_device_hours(Some(50), PoweredOnHoursUnit::Humanize, &card),
            "2 days"
        );
        assert_eq!(
            format_device_hours(Some(5), PoweredOnHoursUnit::Humanize, &card),
            "5 hours"
        );
        assert_eq!(
            format_device_hours(Some(0), PoweredOnHoursUnit::Humanize, &card),
            "0 hours"
        );
    }

    #[test]
    fn file_size_binary() {
        assert_eq!(format_file_size(0, false), "0 B");
        assert_eq!(format_file_size(500, false), "500 B");
        assert_eq!(format_file_size(1500, false), "1.5 KiB");
        assert_eq!(format_file_size(5000, false), "4.9 KiB");
        assert_eq!(format_file_size(999_949, false), "976.5 KiB");
        assert_eq!(format_file_size(1_551_859_712, false), "1.4 GiB");
        assert_eq!(format_file_size(2_100_000_000, false), "2.0 GiB");
    }

    #[test]
    fn file_size_si() {
        assert_eq!(format_file_size(0, true), "0 B");
        assert_eq!(format_file_size(500, true), "500 B");
        assert_eq!(format_file_size(1500, true), "1.5 kB");
        assert_eq!(format_file_size(5000, true), "5.0 kB");
        assert_eq!(format_file_size(999_949, true), "999.9 kB");
        assert_eq!(format_file_size(999_950, true), "1.0 MB");
        assert_eq!(format_file_size(2_100_000_000, true), "2.1 GB");
    }
}
