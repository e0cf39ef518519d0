use super::event_kind::EventKind;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

/// One immutable ledger row.
///
/// `occurred_at` is the absolute instant; `day` is the calendar day of that
/// instant in the configured zone and keys the one-IN/one-OUT invariant.
/// Rows are append-only: nothing in the codebase updates or deletes them.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEvent {
    pub id: i64,
    pub org_id: i64,          // ⇔ attendance.org_id
    pub person_id: i64,       // ⇔ attendance.person_id
    pub kind: EventKind,      // ⇔ attendance.kind ('in' | 'out')
    pub occurred_at: DateTime<Utc>, // ⇔ attendance.occurred_at (TEXT, RFC3339 UTC)
    pub day: NaiveDate,       // ⇔ attendance.day (TEXT "YYYY-MM-DD")
    pub note: String,         // ⇔ attendance.note (work summary, OUT only)
    pub created_at: String,   // ⇔ attendance.created_at (TEXT, RFC3339)
}

impl AttendanceEvent {
    /// Constructor for events created by the Guard.
    /// - `id = 0` until the ledger assigns one
    /// - `created_at = now() in RFC3339`
    pub fn new(
        org_id: i64,
        person_id: i64,
        kind: EventKind,
        occurred_at: DateTime<Utc>,
        day: NaiveDate,
        note: String,
    ) -> Self {
        Self {
            id: 0,
            org_id,
            person_id,
            kind,
            occurred_at,
            day,
            note,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn day_str(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }

    /// Fixed-width RFC3339 UTC form; lexicographic order matches
    /// chronological order, which the range queries rely on.
    pub fn occurred_at_str(&self) -> String {
        self.occurred_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
