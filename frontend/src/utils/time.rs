use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config;

fn app_time_zone() -> Tz {
    config::current_time_zone()
}

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&app_time_zone())
}

pub fn today_in_app_tz() -> NaiveDate {
    now_in_app_tz().date_naive()
}

/// `YYYY-MM` of the current month in the app time zone.
pub fn current_month() -> String {
    format_month(today_in_app_tz())
}

pub fn format_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Accepts `YYYY-MM` only.
pub fn is_valid_month(value: &str) -> bool {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").is_ok()
        && value.trim().len() == 7
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

pub fn format_datetime(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&app_time_zone())
        .format("%Y/%m/%d %H:%M")
        .to_string()
}
