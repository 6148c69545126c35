use chrono::{Datelike as _, NaiveDate, NaiveDateTime, SubsecRound, TimeZone as _};

#[derive(Debug, thiserror::Error)]
#[error("error {0}")]
pub struct Error(String);

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// UTC instant with millisecond precision.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DateTime(chrono::DateTime<chrono::Utc>);

impl DateTime {
    pub fn from_unix_timestamp_millis(unix_timestamp_millis: i64) -> Result<Self, Error> {
        chrono::DateTime::from_timestamp_millis(unix_timestamp_millis)
            .ok_or_else(|| Error("invalid timestamp".to_owned()))
            .map(Self)
    }

    pub fn now() -> Self {
        Self(SubsecRound::trunc_subsecs(chrono::Utc::now(), 3))
    }

    /// Parses the timestamps the ticket site hands out.
    ///
    /// Accepts RFC 3339 with any offset as well as a naive
    /// `YYYY-MM-DDTHH:MM:SS[.fff]`, which is taken as UTC. Anything below
    /// milliseconds is truncated.
    pub fn parse_lenient(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let dt = match chrono::DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt.to_utc(),
            Err(_) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc())
                .map_err(|e| Error(format!("{s}: {e}")))?,
        };
        Ok(Self(SubsecRound::trunc_subsecs(dt, 3)))
    }

    /// 00:00 UTC on the first day of `month`.
    pub fn start_of_month(year: i32, month: u32) -> Result<Self, Error> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(chrono::Utc.from_utc_datetime(&naive)))
            .ok_or_else(|| Error(format!("invalid month {year}-{month}")))
    }

    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }

    /// Hours from `self` until `later`; negative when `later` lies before.
    pub fn hours_until(&self, later: DateTime) -> f64 {
        (later.to_unix_timestamp_millis() - self.to_unix_timestamp_millis()) as f64
            / MILLIS_PER_HOUR
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn to_unix_timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl std::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.to_utc())
            .map_err(|e| Error(e.to_string()))
            .and_then(|dt| {
                if dt == SubsecRound::trunc_subsecs(dt, 3) {
                    Ok(dt)
                } else {
                    Err(Error("invalid subsec".to_string()))
                }
            })
            .map(Self)
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
            .fmt(f)
    }
}
