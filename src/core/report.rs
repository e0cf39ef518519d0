//! Composes per-person aggregates for a roster and a date range into a
//! tabular report value, independent of how it is rendered.

use crate::core::aggregator::aggregate;
use crate::core::time_window::TimeWindow;
use crate::db::pool::DbPool;
use crate::db::queries::{list_members, load_person_events_between};
use crate::errors::AppResult;
use crate::models::organization::Organization;
use crate::models::report::{Report, ReportRow};
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub struct ReportLogic;

impl ReportLogic {
    /// Build the report for one organization's roster over
    /// `[start, end]`, optionally narrowed to members carrying `role`.
    ///
    /// Each member's aggregation is independent of the others; results are
    /// joined before assembling the table. Columns are the union of days
    /// with any activity, ascending; rows sort by display name,
    /// case-insensitive. A report with no columns is valid "no data".
    pub fn build(
        pool: &mut DbPool,
        tw: &TimeWindow,
        org: &Organization,
        start: NaiveDate,
        end: NaiveDate,
        role: Option<&str>,
    ) -> AppResult<Report> {
        let members = list_members(&pool.conn, org.id, role)?;

        let (range_start, _) = tw.day_bounds(start);
        let (_, range_end) = tw.day_bounds(end);

        let mut date_columns: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut rows = Vec::with_capacity(members.len());

        for member in &members {
            let events = load_person_events_between(
                &pool.conn,
                org.id,
                member.person_id,
                (range_start, range_end),
            )?;
            let attendance = aggregate(&events, tw);

            date_columns.extend(attendance.days.keys().copied());

            rows.push(ReportRow {
                name: member.name.clone(),
                worked_days: attendance.days.values().filter(|d| d.is_complete()).count(),
                total_hours: attendance.total_hours,
                days: attendance.days,
            });
        }

        rows.sort_by_key(|row| row.name.to_lowercase());

        Ok(Report {
            start,
            end,
            date_columns: date_columns.into_iter().collect(),
            rows,
        })
    }
}
