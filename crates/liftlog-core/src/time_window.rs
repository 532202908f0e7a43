use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named date ranges offered by the window selector. The upper bound is always "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[default]
    #[serde(rename = "all-time")]
    AllTime,
    #[serde(rename = "last-3-months")]
    Last3Months,
    #[serde(rename = "last-6-months")]
    Last6Months,
    #[serde(rename = "last-year")]
    LastYear,
    #[serde(rename = "year-to-date")]
    YearToDate,
}

#[derive(Debug, Error)]
#[error("unknown time window '{0}' (expected one of: all-time, last-3-months, last-6-months, last-year, year-to-date)")]
pub struct UnknownTimeWindow(pub String);

/// Inclusive `[start, end]` range of wall-clock timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowBounds {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::AllTime,
        TimeWindow::Last3Months,
        TimeWindow::Last6Months,
        TimeWindow::LastYear,
        TimeWindow::YearToDate,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            TimeWindow::AllTime => "all-time",
            TimeWindow::Last3Months => "last-3-months",
            TimeWindow::Last6Months => "last-6-months",
            TimeWindow::LastYear => "last-year",
            TimeWindow::YearToDate => "year-to-date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::AllTime => "All Time",
            TimeWindow::Last3Months => "Last 3 Months",
            TimeWindow::Last6Months => "Last 6 Months",
            TimeWindow::LastYear => "Last 1 Year",
            TimeWindow::YearToDate => "Year To Date",
        }
    }

    /// Fixed look-back for the rolling windows.
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            TimeWindow::Last3Months => Some(90),
            TimeWindow::Last6Months => Some(180),
            TimeWindow::LastYear => Some(365),
            TimeWindow::AllTime | TimeWindow::YearToDate => None,
        }
    }

    /// `earliest` is the first timestamp in the log; `AllTime` starts there (or at
    /// `now` for an empty log).
    pub fn bounds(&self, now: NaiveDateTime, earliest: Option<NaiveDateTime>) -> WindowBounds {
        let start = match self {
            TimeWindow::AllTime => earliest.unwrap_or(now),
            TimeWindow::YearToDate => now
                .with_ordinal(1)
                .map(|jan_first| jan_first.date().and_time(NaiveTime::MIN))
                .unwrap_or(now),
            rolling => now - Duration::days(rolling.lookback_days().unwrap_or_default()),
        };
        WindowBounds { start, end: now }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = UnknownTimeWindow;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "all-time" | "all" => Ok(TimeWindow::AllTime),
            "last-3-months" | "3m" => Ok(TimeWindow::Last3Months),
            "last-6-months" | "6m" => Ok(TimeWindow::Last6Months),
            "last-year" | "last-1-year" | "1y" => Ok(TimeWindow::LastYear),
            "year-to-date" | "ytd" => Ok(TimeWindow::YearToDate),
            _ => Err(UnknownTimeWindow(value.to_string())),
        }
    }
}
