use std::fmt::Write;

use colored::{ColoredString, Colorize};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

use crate::insights::{DailyDeployments, DoraReport, KpiSnapshot, Rating, WeekdayHours};
use crate::models::RunRecord;

const LEAD_TIME_TARGET_MINUTES: f64 = 60.0;
const FAILURE_RATE_TARGET_PERCENT: f64 = 15.0;
const MTTR_TARGET_MINUTES: f64 = 30.0;

const BAR_WIDTH: usize = 40;

/// Render the full terminal dashboard for one report.
pub fn render(report: &DoraReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "DevOps Command Center".bold());
    let _ = writeln!(
        out,
        "Repository: {} | Window: Last {} Days | Collected: {}",
        report.repository.cyan(),
        report.window_days,
        report.collected_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", kpi_cards(&report.kpis));
    let _ = writeln!(out, "{}", score_line(&report.kpis));
    let _ = writeln!(out);

    section(&mut out, "Deployments per Day");
    out.push_str(&daily_bars(&report.daily_deployments));
    let _ = writeln!(out);

    section(&mut out, "Stability Index");
    let _ = writeln!(out, "{}", stability_table(report));
    let _ = writeln!(out);

    section(&mut out, "Activity Heat Map (UTC)");
    let _ = writeln!(out, "{}", heatmap_table(&report.weekday_hour_heatmap));
    let _ = writeln!(out);

    section(&mut out, "Raw Pipeline Data");
    let _ = writeln!(out, "{}", runs_table(&report.runs));

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title.bold().underline());
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

fn kpi_cards(kpis: &KpiSnapshot) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Deployment Frequency",
        "Lead Time (Avg)",
        "Change Failure Rate",
        "MTTR (Avg Restore)",
    ]);
    table.add_row(vec![
        format!("{:.2}/day", kpis.deployments_per_day),
        format!("{:.0} min", kpis.avg_lead_time_minutes),
        format!("{:.1}%", kpis.change_failure_rate),
        format!("{:.0} min", kpis.avg_mttr_minutes),
    ]);
    table.add_row(vec![
        format!("{} total", kpis.deployments),
        target_note(kpis.avg_lead_time_minutes, LEAD_TIME_TARGET_MINUTES, "m"),
        target_note(kpis.change_failure_rate, FAILURE_RATE_TARGET_PERCENT, "%"),
        target_note(kpis.avg_mttr_minutes, MTTR_TARGET_MINUTES, "m"),
    ]);
    table
}

fn target_note(value: f64, target: f64, unit: &str) -> String {
    let verdict = if value < target { "on target" } else { "off target" };
    format!("Target: < {target:.0}{unit} ({verdict})")
}

fn score_line(kpis: &KpiSnapshot) -> String {
    let breakdown = &kpis.score_breakdown;
    format!(
        "DORA score: {}/100  Rating: {}\n  deploy frequency {} | lead time {} | failure rate {} | MTTR {}",
        kpis.score.to_string().bold(),
        rating_label(kpis.rating),
        breakdown.deployment_frequency,
        breakdown.lead_time,
        breakdown.change_failure_rate,
        breakdown.mttr
    )
}

fn rating_label(rating: Rating) -> ColoredString {
    match rating {
        Rating::Elite => rating.as_str().green().bold(),
        Rating::High => rating.as_str().cyan().bold(),
        Rating::Medium => rating.as_str().yellow().bold(),
        Rating::Low => rating.as_str().red().bold(),
    }
}

fn daily_bars(daily: &[DailyDeployments]) -> String {
    if daily.is_empty() {
        return "No deployments in window\n".to_string();
    }

    let max = daily.iter().map(|d| d.deployments).max().unwrap_or(1).max(1);
    let mut out = String::new();

    for day in daily {
        let width = (day.deployments * BAR_WIDTH).div_ceil(max);
        let _ = writeln!(
            out,
            "{} {} {}",
            day.date,
            "█".repeat(width).green(),
            day.deployments
        );
    }

    out
}

fn stability_table(report: &DoraReport) -> Table {
    let total: usize = report.conclusion_breakdown.values().sum();
    let mut table = new_table();
    table.set_header(vec!["Conclusion", "Runs", "Share"]);

    for (label, count) in &report.conclusion_breakdown {
        #[allow(clippy::cast_precision_loss)]
        let share = *count as f64 / total.max(1) as f64 * 100.0;
        table.add_row(vec![label.clone(), count.to_string(), format!("{share:.1}%")]);
    }

    table
}

fn heatmap_table(rows: &[WeekdayHours]) -> Table {
    let mut table = new_table();
    let mut header = vec!["Day".to_string()];
    header.extend((0..24).map(|h| format!("{h:02}")));
    table.set_header(header);

    for row in rows {
        let mut cells = vec![row.weekday.to_string()];
        cells.extend(row.hours.iter().map(|&count| {
            if count == 0 {
                ".".to_string()
            } else {
                count.to_string()
            }
        }));
        table.add_row(cells);
    }

    table
}

fn runs_table(runs: &[RunRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Name", "Conclusion", "Created", "Actor", "Branch"]);

    for run in runs {
        table.add_row(vec![
            run.name.clone(),
            run.conclusion.label().to_string(),
            run.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            run.actor.clone(),
            run.branch.clone(),
        ]);
    }

    table
}
