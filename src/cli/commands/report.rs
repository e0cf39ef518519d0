use crate::cli::commands::{resolve_org, time_window};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::db::queries::get_organization;
use crate::errors::{AppError, AppResult};
use crate::export::{ReportFormat, export_report_csv, export_report_json};
use crate::models::interval::DailyInterval;
use crate::models::report::Report;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

/// Display or export members' attendance records over a date range.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        org,
        from,
        to,
        role,
        format,
        file,
    } = cmd
    {
        let org_ext = resolve_org(org, cfg)?;
        let tw = time_window(cfg)?;
        let (start, end) = tw.validate_range_args(from, to)?;

        let mut pool = DbPool::new(&cfg.database)?;

        let org = get_organization(&pool.conn, &org_ext)?
            .ok_or_else(|| AppError::UnknownOrganization(org_ext.clone()))?;

        let report = ReportLogic::build(&mut pool, &tw, &org, start, end, role.as_deref())?;

        if report.is_empty() {
            info(format!(
                "No attendance records for {} between {} and {}.",
                org.name,
                start.format("%m/%d/%y"),
                end.format("%m/%d/%y"),
            ));
            return Ok(());
        }

        match format {
            ReportFormat::Table => {
                println!(
                    "📊 Attendance report for {}: {} → {}\n",
                    org.name,
                    start.format("%m/%d/%y"),
                    end.format("%m/%d/%y"),
                );
                print!("{}", render_table(&report));
            }
            ReportFormat::Csv | ReportFormat::Json => {
                let dest = file.as_deref().ok_or_else(|| {
                    AppError::Export(format!(
                        "--file is required for {} exports",
                        format.as_str()
                    ))
                })?;
                let path = expand_tilde(dest);

                if *format == ReportFormat::Csv {
                    export_report_csv(&report, &path)?;
                } else {
                    export_report_json(&report, &path)?;
                }
            }
        }
    }

    Ok(())
}

fn format_cell(interval: Option<&DailyInterval>) -> String {
    match interval {
        None => "-".to_string(),
        Some(iv) => {
            let in_s = iv
                .in_at
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string());
            let out_s = iv
                .out_at
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string());
            format!("{}-{} ({}h)", in_s, out_s, iv.hours)
        }
    }
}

fn render_table(report: &Report) -> String {
    let mut headers = vec!["Name".to_string(), "Days".to_string(), "Hours".to_string()];
    headers.extend(
        report
            .date_columns
            .iter()
            .map(|d| d.format("%m/%d/%y").to_string()),
    );

    let mut table = Table::new(headers);

    for row in &report.rows {
        let mut cells = vec![
            row.name.clone(),
            row.worked_days.to_string(),
            row.total_hours.to_string(),
        ];
        cells.extend(
            report
                .date_columns
                .iter()
                .map(|date| format_cell(row.days.get(date))),
        );
        table.add_row(cells);
    }

    table.render()
}
