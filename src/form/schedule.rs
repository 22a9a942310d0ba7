//! Preferred appointment slot and the weekly business-hours lookup.

use chrono::{Months, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{HourWindow, ScheduleConfig};

/// Field id of the preferred date input.
pub const DATE_FIELD: &str = "data_preferida";
/// Field id of the preferred time input.
pub const TIME_FIELD: &str = "hora_preferida";

/// How far ahead an appointment may be booked.
pub const BOOKING_HORIZON_MONTHS: u32 = 6;

/// Preferred appointment date and time, either of which may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl ScheduleWindow {
    pub fn new(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Self {
        Self { date, time }
    }

    /// Parse raw input values (`YYYY-MM-DD`, `HH:MM`). Blank or malformed
    /// values count as not provided.
    pub fn from_raw(date: &str, time: &str) -> Self {
        Self {
            date: parse_date(date),
            time: parse_time(time),
        }
    }

    /// `dd/mm/yyyy HH:MM`, when both parts are present.
    pub fn combined(&self) -> Option<String> {
        match (self.date, self.time) {
            (Some(d), Some(t)) => Some(format!("{} {}", d.format("%d/%m/%Y"), t.format("%H:%M"))),
            _ => None,
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::debug!(value = raw, error = %e, "unparseable preferred date");
            None
        }
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::debug!(value = raw, error = %e, "unparseable preferred time");
            None
        }
    }
}

/// Earliest and latest bookable dates relative to `today`.
pub fn booking_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let max = today
        .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
        .unwrap_or(NaiveDate::MAX);
    (today, max)
}

impl ScheduleConfig {
    /// Opening window for `day`, `None` when closed.
    pub fn hours_for(&self, day: Weekday) -> Option<HourWindow> {
        match day {
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
            _ => self.weekdays,
        }
    }

    /// Message shown when `day` has no opening window.
    pub fn closed_message(&self, day: Weekday) -> String {
        match day {
            Weekday::Sun => "Não funcionamos aos domingos".to_string(),
            Weekday::Sat => "Não funcionamos aos sábados".to_string(),
            _ => "Não funcionamos de segunda a sexta".to_string(),
        }
    }

    /// Message shown when the requested hour falls outside `day`'s window.
    pub fn outside_hours_message(&self, day: Weekday, window: HourWindow) -> String {
        let label = match day {
            Weekday::Sat => "Sábado",
            Weekday::Sun => "Domingo",
            _ => "Seg-Sex",
        };
        format!(
            "{label}: funcionamento de {:02}:00 às {:02}:00",
            window.open_hour, window.close_hour
        )
    }
}
