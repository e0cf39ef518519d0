use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// One person's worked interval for one calendar day, derived from the
/// ledger and never stored. Times are already shifted into the configured
/// zone. A day with a single side present keeps `hours = 0` but still
/// appears, so reports can flag incomplete days.
#[derive(Debug, Clone, Serialize)]
pub struct DailyInterval {
    pub date: NaiveDate,
    pub in_at: Option<DateTime<FixedOffset>>,
    pub out_at: Option<DateTime<FixedOffset>>,
    pub hours: i64,
}

impl DailyInterval {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            in_at: None,
            out_at: None,
            hours: 0,
        }
    }

    /// A worked day has both sides recorded, regardless of the computed
    /// hour count.
    pub fn is_complete(&self) -> bool {
        self.in_at.is_some() && self.out_at.is_some()
    }
}
