//! Sunrise/sunset clock formatting

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shown when a timestamp falls outside the representable calendar range.
pub const TIME_PLACEHOLDER: &str = "--:--";

/// Hour convention for displayed times
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
pub enum ClockStyle {
    #[default]
    #[value(name = "24h")]
    TwentyFourHour,
    #[value(name = "12h")]
    TwelveHour,
}

impl ClockStyle {
    pub fn toggle(&self) -> Self {
        match self {
            ClockStyle::TwentyFourHour => ClockStyle::TwelveHour,
            ClockStyle::TwelveHour => ClockStyle::TwentyFourHour,
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            ClockStyle::TwentyFourHour => "%H:%M",
            ClockStyle::TwelveHour => "%I:%M %p",
        }
    }
}

/// Time zone the viewer reads times in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ViewerZone {
    /// The machine's local zone
    #[default]
    Local,
    /// A fixed offset east of UTC, in seconds
    Fixed { offset_secs: i32 },
}

impl ViewerZone {
    pub const UTC: ViewerZone = ViewerZone::Fixed { offset_secs: 0 };

    pub fn format(&self, timestamp: i64, clock: ClockStyle) -> String {
        match self {
            ViewerZone::Local => format_time(timestamp, &Local, clock),
            ViewerZone::Fixed { offset_secs } => match FixedOffset::east_opt(*offset_secs) {
                Some(offset) => format_time(timestamp, &offset, clock),
                None => format_time(timestamp, &Utc, clock),
            },
        }
    }
}

/// Format a Unix timestamp (seconds) as a two-digit hour and minute in `zone`.
pub fn format_time<Tz>(timestamp: i64, zone: &Tz, clock: ClockStyle) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(zone).format(clock.pattern()).to_string(),
        None => TIME_PLACEHOLDER.to_string(),
    }
}
