use super::interval::DailyInterval;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Attendance of one roster member over the requested range.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub worked_days: usize,
    pub total_hours: i64,
    pub days: BTreeMap<NaiveDate, DailyInterval>,
}

/// The assembled report: a pure value object with no rendering attached.
/// `date_columns` is the ascending set of distinct days present in any
/// row; days with zero activity across the whole roster are omitted even
/// when they fall inside the requested range.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub date_columns: Vec<NaiveDate>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// No member had any interval in range. Callers treat this as
    /// "no data", not as an error.
    pub fn is_empty(&self) -> bool {
        self.date_columns.is_empty()
    }
}
