//! Day-boundary math and date-argument validation.
//!
//! Every calendar-day computation in the system goes through a TimeWindow
//! built from the configured UTC offset, so there is no ambient global
//! zone state anywhere.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;

const DATE_TOKEN_FORMAT: &str = "%m/%d/%y";

pub struct TimeWindow {
    offset: FixedOffset,
    backdate_limit_days: i64,
}

impl TimeWindow {
    pub fn new(offset: FixedOffset, backdate_limit_days: i64) -> Self {
        Self {
            offset,
            backdate_limit_days,
        }
    }

    pub fn backdate_limit_days(&self) -> i64 {
        self.backdate_limit_days
    }

    /// Current instant shifted into the configured zone.
    pub fn now_local(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// Current calendar date in the configured zone.
    pub fn today(&self) -> NaiveDate {
        self.now_local().date_naive()
    }

    /// Shift an absolute instant into the configured zone.
    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// Calendar day an instant falls on in the configured zone.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    /// Interpret a zone-local wall-clock datetime as an absolute instant.
    pub fn to_utc(&self, local: chrono::NaiveDateTime) -> DateTime<Utc> {
        // Unambiguous for a fixed offset.
        self.offset
            .from_local_datetime(&local)
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Inclusive instant bounds of a calendar date in the configured zone
    /// (00:00:00 through 23:59:59).
    pub fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.to_utc(date.and_time(NaiveTime::MIN));
        let end = start + Duration::hours(24) - Duration::seconds(1);
        (start, end)
    }

    /// Parse a strict MM/DD/YY token without any window check.
    fn parse_token(&self, token: &str) -> AppResult<NaiveDate> {
        let pattern = Regex::new(r"^\d{2}/\d{2}/\d{2}$").unwrap();
        if !pattern.is_match(token) {
            return Err(AppError::InvalidDateFormat(token.to_string()));
        }

        NaiveDate::parse_from_str(token, DATE_TOKEN_FORMAT)
            .map_err(|_| AppError::InvalidDate(token.to_string()))
    }

    /// Validate a checkout date argument against the sliding window:
    /// today, back to `backdate_limit_days` before today (inclusive).
    /// People legitimately forget to check out same-day, but must not
    /// rewrite arbitrary history.
    pub fn validate_backdate_arg(&self, token: &str, today: NaiveDate) -> AppResult<NaiveDate> {
        let date = self.parse_token(token)?;

        if date > today {
            return Err(AppError::FutureDate(token.to_string()));
        }

        if date < today - Duration::days(self.backdate_limit_days) {
            return Err(AppError::TooOld(
                token.to_string(),
                self.backdate_limit_days,
            ));
        }

        Ok(date)
    }

    /// Validate a report range: both endpoints strict MM/DD/YY and real
    /// dates, start not after end. Range endpoints are not subject to the
    /// backdate window; only checkout is.
    pub fn validate_range_args(
        &self,
        start_token: &str,
        end_token: &str,
    ) -> AppResult<(NaiveDate, NaiveDate)> {
        let start = self.parse_token(start_token)?;
        let end = self.parse_token(end_token)?;

        if start > end {
            return Err(AppError::StartAfterEnd);
        }

        Ok((start, end))
    }
}
