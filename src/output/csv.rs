use chrono::SecondsFormat;

use crate::models::RunRecord;

const HEADER: [&str; 7] = [
    "id",
    "name",
    "conclusion",
    "status",
    "created_at",
    "actor",
    "branch",
];

/// Render runs as RFC 4180 CSV with a header row.
pub fn export_runs(runs: &[RunRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER.iter().map(|h| (*h).to_string()));

    for run in runs {
        push_row(
            &mut out,
            [
                run.id.to_string(),
                run.name.clone(),
                run.conclusion.label().to_string(),
                run.status.clone(),
                run.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                run.actor.clone(),
                run.branch.clone(),
            ],
        );
    }

    out
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let row: Vec<String> = fields.into_iter().map(|f| escape(&f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
