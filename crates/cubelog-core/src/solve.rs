//! Solve records as logged by the user or imported from a backup.
//!
//! The field layout matches the JSON export format, so documents written by
//! older versions of the log deserialize unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{self, NormalizedTime};

/// A solve time exactly as it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    /// Seconds.
    Seconds(f64),
    /// Free text: `"DNF"`, `"1:02.34"`, `"12.34"`.
    Text(String),
}

impl RawTime {
    pub fn dnf() -> Self {
        RawTime::Text("DNF".to_string())
    }

    /// Text that is a plain number becomes `Seconds`; anything else stays text.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() => RawTime::Seconds(seconds),
            _ => RawTime::Text(input.to_string()),
        }
    }
}

impl std::fmt::Display for RawTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawTime::Seconds(seconds) => write!(f, "{seconds}"),
            RawTime::Text(text) => f.write_str(text),
        }
    }
}

/// One logged attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solve {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub time: Option<RawTime>,
    #[serde(default, alias = "TimewithPenalty")]
    pub time_with_penalty: Option<RawTime>,
    #[serde(default, alias = "Date")]
    pub date: String,
    /// Sequence tag from the timer app the solve was exported from.
    #[serde(default, alias = "No")]
    pub number: Option<i64>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub scramble: String,
    #[serde(default)]
    pub notes: String,
}

impl Solve {
    /// Build a solve from user input.
    ///
    /// Accepts a DNF marker or a non-negative number of seconds.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTime`] for any other time text and
    /// [`ValidationError::InvalidDate`] if the date cannot be parsed.
    pub fn new_entry(input: &str, date: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let time = if trimmed.to_ascii_lowercase().contains("dnf") {
            RawTime::dnf()
        } else {
            match trimmed.parse::<f64>() {
                Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => RawTime::Seconds(seconds),
                _ => return Err(ValidationError::InvalidTime(input.to_string())),
            }
        };

        let timestamp = parse_date_ms(date)
            .ok_or_else(|| ValidationError::InvalidDate(date.to_string()))?;

        Ok(Self {
            id: 0,
            time: Some(time.clone()),
            time_with_penalty: Some(time),
            date: date.to_string(),
            number: None,
            timestamp: Some(timestamp),
            scramble: String::new(),
            notes: String::new(),
        })
    }

    /// The time the averaging engine sees: penalty time when recorded,
    /// otherwise the plain time. A solve carrying neither is DNF.
    pub fn normalized(&self) -> NormalizedTime {
        self.time_with_penalty
            .as_ref()
            .or(self.time.as_ref())
            .map_or(NormalizedTime::Dnf, time::parse)
    }

    /// Parsed `date`, falling back to `timestamp`, then to the epoch.
    pub fn epoch_ms(&self) -> i64 {
        parse_date_ms(&self.date)
            .or(self.timestamp)
            .unwrap_or(0)
    }

    /// Whether a penalty changed the recorded time.
    pub fn has_penalty(&self) -> bool {
        match (&self.time, &self.time_with_penalty) {
            (Some(time), Some(penalty)) => time != penalty,
            _ => false,
        }
    }
}

/// Parse the date formats the log has used over time into epoch milliseconds.
///
/// Values without an offset are read as UTC.
pub fn parse_date_ms(date: &str) -> Option<i64> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.timestamp_millis());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Current time in the `YYYY-MM-DDTHH:MM` form used for new entries.
pub fn now_entry_date() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_export_format() {
        let json = r#"{
            "id": 1700000000000,
            "time": 12.34,
            "timeWithPenalty": 14.34,
            "date": "2024-03-01T10:00",
            "scramble": "R U R'",
            "notes": "+2",
            "timestamp": 1709287200000
        }"#;
        let solve: Solve = serde_json::from_str(json).unwrap();
        assert_eq!(solve.time, Some(RawTime::Seconds(12.34)));
        assert_eq!(solve.time_with_penalty, Some(RawTime::Seconds(14.34)));
        assert!(solve.has_penalty());
        assert_eq!(solve.normalized(), NormalizedTime::Finished(14340.0));
    }

    #[test]
    fn accepts_timer_app_aliases() {
        let json = r#"{ "No": 7, "time": "DNF", "TimewithPenalty": "DNF", "Date": "2024-01-02" }"#;
        let solve: Solve = serde_json::from_str(json).unwrap();
        assert_eq!(solve.number, Some(7));
        assert_eq!(solve.date, "2024-01-02");
        assert!(solve.normalized().is_dnf());
    }

    #[test]
    fn null_time_with_penalty_falls_back() {
        let json = r#"{ "time": "1:02.50", "timeWithPenalty": null, "date": "" }"#;
        let solve: Solve = serde_json::from_str(json).unwrap();
        assert_eq!(solve.normalized(), NormalizedTime::Finished(62500.0));
    }

    #[test]
    fn missing_times_are_dnf() {
        let solve: Solve = serde_json::from_str(r#"{ "date": "2024-01-02" }"#).unwrap();
        assert!(solve.normalized().is_dnf());
    }

    #[test]
    fn new_entry_validates_time() {
        let solve = Solve::new_entry("12.5", "2024-03-01T10:00").unwrap();
        assert_eq!(solve.time, Some(RawTime::Seconds(12.5)));
        assert_eq!(solve.timestamp, parse_date_ms("2024-03-01T10:00"));

        let dnf = Solve::new_entry("dnf", "2024-03-01T10:00").unwrap();
        assert_eq!(dnf.time, Some(RawTime::dnf()));

        assert!(matches!(
            Solve::new_entry("fast", "2024-03-01T10:00"),
            Err(ValidationError::InvalidTime(_))
        ));
        assert!(matches!(
            Solve::new_entry("-3", "2024-03-01T10:00"),
            Err(ValidationError::InvalidTime(_))
        ));
        assert!(matches!(
            Solve::new_entry("12", "yesterday"),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn date_formats() {
        let base = parse_date_ms("2024-03-01T10:00:00Z").unwrap();
        assert_eq!(parse_date_ms("2024-03-01T10:00"), Some(base));
        assert_eq!(parse_date_ms("2024-03-01T10:00:00.000"), Some(base));
        assert_eq!(parse_date_ms("2024-03-01 10:00:00"), Some(base));
        assert_eq!(parse_date_ms("2024-03-01T12:00:00+02:00"), Some(base));
        assert_eq!(
            parse_date_ms("2024-03-01"),
            Some(base - 10 * 3600 * 1000)
        );
        assert_eq!(parse_date_ms("not a date"), None);
    }

    #[test]
    fn epoch_falls_back_to_timestamp() {
        let solve = Solve {
            id: 0,
            time: Some(RawTime::Seconds(10.0)),
            time_with_penalty: None,
            date: "garbage".into(),
            number: None,
            timestamp: Some(42),
            scramble: String::new(),
            notes: String::new(),
        };
        assert_eq!(solve.epoch_ms(), 42);
    }

    #[test]
    fn raw_time_from_input() {
        assert_eq!(RawTime::from_input(" 9.5 "), RawTime::Seconds(9.5));
        assert_eq!(RawTime::from_input("DNF"), RawTime::Text("DNF".into()));
        assert_eq!(RawTime::from_input("1:02.5"), RawTime::Text("1:02.5".into()));
    }
}
