//! Query filters shared by the dashboard and report endpoints.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Inclusive bounds on an event's scheduled date/time. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl DateRange {
    /// Parse optional `start_date` / `end_date` query values.
    ///
    /// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates. A plain start
    /// date means the start of that day (UTC); a plain end date covers the
    /// whole day.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, CoreError> {
        let start = non_empty(start)
            .map(|s| parse_bound(s, Bound::Start))
            .transpose()?;
        let end = non_empty(end)
            .map(|s| parse_bound(s, Bound::End))
            .transpose()?;

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(CoreError::Validation(
                    "start_date must not be after end_date".into(),
                ));
            }
        }
        Ok(Self { start, end })
    }

    /// Both ends present, as required by date-range reports.
    pub fn closed(&self) -> Option<(Timestamp, Timestamp)> {
        Some((self.start?, self.end?))
    }
}

/// Filter applied to events before aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub range: DateRange,
    /// Restrict to events whose type option is this id.
    pub type_option_id: Option<DbId>,
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

fn parse_bound(raw: &str, bound: Bound) -> Result<Timestamp, CoreError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Invalid date '{raw}': expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })?;
    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN),
    };
    Ok(date.and_time(time).and_utc())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    #[test]
    fn empty_values_leave_range_open() {
        let range = DateRange::parse(None, Some("")).unwrap();
        assert_eq!(range, DateRange::default());
        assert!(range.closed().is_none());
    }

    #[test]
    fn plain_dates_cover_whole_days() {
        let range = DateRange::parse(Some("2025-01-10"), Some("2025-01-12")).unwrap();
        assert_eq!(
            range.start,
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap())
        );
        let end = range.end.unwrap();
        assert!(end > Utc.with_ymd_and_hms(2025, 1, 12, 23, 59, 59).unwrap());
        assert!(end < Utc.with_ymd_and_hms(2025, 1, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_timestamps_are_exact() {
        let range = DateRange::parse(Some("2025-01-10T08:00:00Z"), None).unwrap();
        assert_eq!(
            range.start,
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap())
        );
        assert!(range.end.is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert_matches!(
            DateRange::parse(Some("next tuesday"), None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_matches!(
            DateRange::parse(Some("2025-02-01"), Some("2025-01-01")),
            Err(CoreError::Validation(_))
        );
    }
}
