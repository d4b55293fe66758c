use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Parses a calendar day from hauler exports and payloads.
pub(crate) fn parse_day(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Parses a billing month (`MM/YYYY`, `YYYY-MM`, or a full date) to the first of that month.
pub(crate) fn parse_month(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Some(day) = parse_day(trimmed) {
        return day.with_day(1);
    }

    let (year, month) = match trimmed.split_once('/') {
        Some((month, year)) => (year, month),
        None => trimmed.split_once('-')?,
    };

    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub(crate) fn month_label(month: NaiveDate) -> String {
    month.format("%m/%Y").to_string()
}

pub(crate) fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "failed to parse '{raw}' as YYYY-MM-DD, MM/DD/YYYY or RFC 3339"
        ))
    })
}

pub(crate) fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.filter(|value| !value.trim().is_empty()) {
        Some(raw) => parse_day(&raw).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{raw}' as a calendar date"))
        }),
        None => Ok(None),
    }
}

pub(crate) fn deserialize_month<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_month(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("failed to parse '{raw}' as MM/YYYY or YYYY-MM"))
    })
}
