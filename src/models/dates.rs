//! Conversions between wire timestamps and what date inputs and tables show.

use chrono::{DateTime, NaiveDate, Utc};

/// `2024-03-15T00:00:00Z` -> `2024-03-15`, the value a date input expects.
pub fn to_input_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// `2024-03-15` -> midnight UTC of that day.
pub fn from_input_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Day-first display used in list tables.
pub fn to_display_date(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn timestamp_to_input_value() {
        assert_eq!(to_input_date(&parse("2024-03-15T00:00:00Z")), "2024-03-15");
        assert_eq!(to_input_date(&parse("2024-03-15T23:10:00-02:00")), "2024-03-16");
    }

    #[test]
    fn input_value_to_timestamp() {
        let ts = from_input_date("2024-03-15").unwrap();
        assert_eq!(ts, parse("2024-03-15T00:00:00Z"));
        assert!(from_input_date("").is_none());
        assert!(from_input_date("15/03/2024").is_none());
    }

    #[test]
    fn display_is_day_first() {
        assert_eq!(to_display_date(&parse("2023-11-02T10:00:00Z")), "02/11/2023");
    }
}
