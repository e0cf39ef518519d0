//! Turns a person's raw IN/OUT events over a date range into per-day
//! worked intervals and a total.

use crate::core::time_window::TimeWindow;
use crate::models::event::AttendanceEvent;
use crate::models::interval::DailyInterval;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Aggregated attendance of one person over one date range.
#[derive(Debug, Default, Clone)]
pub struct PersonAttendance {
    pub days: BTreeMap<NaiveDate, DailyInterval>,
    pub total_hours: i64,
}

/// Duration in whole hours, rounded from the fractional value.
fn round_hours(d: Duration) -> i64 {
    (d.num_minutes() as f64 / 60.0).round() as i64
}

/// Partition events by calendar day in the configured zone and assign each
/// day's IN and OUT directly. Events must arrive ascending by `occurred_at`
/// (the ledger contract); if a day ever carries duplicates of a kind, the
/// last one scanned wins. That tie-break is a safety net for states the
/// Guard's uniqueness invariant makes unreachable, not an expected case.
///
/// A day with both sides gets `hours = round(out - in)`; a day with one
/// side stays at 0 hours but is kept, so reports can flag it. Negative
/// spans (OUT before IN, only possible when ledger invariants were
/// bypassed) are propagated un-clamped.
pub fn aggregate(events: &[AttendanceEvent], tw: &TimeWindow) -> PersonAttendance {
    let mut days: BTreeMap<NaiveDate, DailyInterval> = BTreeMap::new();

    for ev in events {
        let local = tw.local(ev.occurred_at);
        let date = local.date_naive();
        let interval = days
            .entry(date)
            .or_insert_with(|| DailyInterval::new(date));

        if ev.kind.is_in() {
            interval.in_at = Some(local);
        } else {
            interval.out_at = Some(local);
        }
    }

    let mut total_hours = 0;
    for interval in days.values_mut() {
        if let (Some(in_at), Some(out_at)) = (interval.in_at, interval.out_at) {
            interval.hours = round_hours(out_at - in_at);
        }
        total_hours += interval.hours;
    }

    PersonAttendance { days, total_hours }
}
