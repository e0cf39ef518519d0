use crate::models::report::Report;
use serde::Serialize;

/// Flat per-member-per-day row for CSV export.
#[derive(Serialize, Clone, Debug)]
pub struct ReportCellExport {
    pub name: String,
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub hours: i64,
}

/// Flatten the report matrix into one row per member per active day.
/// Days a member has no events for are skipped, matching the table view
/// where such cells render as "-".
pub(crate) fn flatten_report(report: &Report) -> Vec<ReportCellExport> {
    let mut out = Vec::new();

    for row in &report.rows {
        for (date, interval) in &row.days {
            out.push(ReportCellExport {
                name: row.name.clone(),
                date: date.format("%m/%d/%y").to_string(),
                check_in: interval
                    .in_at
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                check_out: interval
                    .out_at
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                hours: interval.hours,
            });
        }
    }

    out
}
