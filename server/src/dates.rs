use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Parses an ISO-8601 timestamp. A plain calendar date (the form the client
/// submits from its date inputs) is widened to midnight UTC.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(e) => value
            .parse::<NaiveDate>()
            .map(|date| Utc.from_utc_datetime(&date.and_hms(0, 0, 0)))
            .map_err(|_| e),
    }
}

/// Deserializes an optional timestamp via `parse`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where D: Deserializer<'de> {
    let o: Option<String> = Deserialize::deserialize(deserializer)?;

    o.map(|value| parse(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::parse;

    #[test]
    fn widens_calendar_dates_to_midnight_utc() {
        let parsed = parse("2024-05-01").expect("parse calendar date");

        assert_eq!(parsed, Utc.ymd(2024, 5, 1).and_hms(0, 0, 0));
    }

    #[test]
    fn accepts_full_timestamps() {
        let parsed = parse("2024-05-01T09:30:00+05:30").expect("parse timestamp");

        assert_eq!(parsed, Utc.ymd(2024, 5, 1).and_hms(4, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("next Tuesday").is_err());
        assert!(parse("2024-13-40").is_err());
    }
}
