use jiff::{Timestamp, Zoned, civil::DateTime, tz::TimeZone};

/// When traffic is evaluated: an exact instant, or a wall-clock time that
/// still needs a time zone.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationTime {
    Instant(Timestamp),
    Civil(DateTime),
}

pub fn parse_evaluation_time(input: &str) -> Result<EvaluationTime, String> {
    if let Ok(timestamp) = input.parse::<Timestamp>() {
        return Ok(EvaluationTime::Instant(timestamp));
    }

    if let Ok(datetime) = input.parse::<DateTime>() {
        return Ok(EvaluationTime::Civil(datetime));
    }

    Err(String::from(
        "Invalid time, expected e.g. \"2024-01-03T09:00\" or \"2024-01-03T03:30:00Z\"",
    ))
}

/// Resolves the evaluation time in `tz` (an IANA name), or in the system
/// time zone when none is given. Defaults to now.
pub fn resolve_evaluation_time(
    at: Option<EvaluationTime>,
    tz: Option<&str>,
) -> Result<Zoned, anyhow::Error> {
    let time_zone = match tz {
        Some(name) => TimeZone::get(name)?,
        None => TimeZone::system(),
    };

    let zoned = match at {
        Some(EvaluationTime::Instant(timestamp)) => timestamp.to_zoned(time_zone),
        Some(EvaluationTime::Civil(datetime)) => datetime.to_zoned(time_zone)?,
        None => Timestamp::now().to_zoned(time_zone),
    };

    Ok(zoned)
}
