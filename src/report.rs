use std::fmt::Write;

use serde_json::Value;

use crate::present::{ChartSpec, Dashboard};

pub fn render_markdown(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {}", dashboard.title);
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Generated on {} for the {} term ({}).",
        dashboard.generated_on,
        dashboard.term,
        selection_label(dashboard)
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Key Metrics");
    let _ = writeln!(output);
    for kpi in &dashboard.kpis {
        let _ = writeln!(output, "- {}: {}", kpi.label, kpi.value);
    }
    let _ = writeln!(output);

    for chart in &dashboard.charts {
        chart_section(&mut output, chart);
    }

    let _ = writeln!(output, "## Key Findings & Insights");
    let _ = writeln!(output);
    let notes = findings(dashboard);
    if notes.is_empty() {
        let _ = writeln!(output, "Not enough data to summarize trends.");
    } else {
        for note in notes {
            let _ = writeln!(output, "- {note}");
        }
    }

    output
}

fn selection_label(dashboard: &Dashboard) -> String {
    if dashboard.departments == dashboard.department_choices {
        "all departments".to_string()
    } else if dashboard.departments.is_empty() {
        "no departments".to_string()
    } else {
        dashboard.departments.join(", ")
    }
}

fn chart_section(output: &mut String, chart: &ChartSpec) {
    let _ = writeln!(output, "## {}", chart.title);
    let _ = writeln!(output);

    if chart.data.is_empty() {
        let _ = writeln!(output, "No rows match the current selection.");
        let _ = writeln!(output);
        return;
    }

    let mut columns = vec![chart.x.clone()];
    columns.extend(chart.y.iter().cloned());

    let _ = writeln!(output, "| {} |", columns.join(" | "));
    let _ = writeln!(output, "|{}|", vec!["---"; columns.len()].join("|"));
    for row in &chart.data {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| match row.get(column.as_str()) {
                Some(value) => cell(value),
                None => String::new(),
            })
            .collect();
        let _ = writeln!(output, "| {} |", cells.join(" | "));
    }
    let _ = writeln!(output);
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(number) => match number.as_i64() {
            Some(int) => int.to_string(),
            None => format!("{:.2}", number.as_f64().unwrap_or_default()),
        },
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn findings(dashboard: &Dashboard) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(note) = chart(dashboard, "Retention Rate Over Time")
        .and_then(|c| trend_note(c, "Average retention rate"))
    {
        notes.push(note);
    }
    if let Some(note) = chart(dashboard, "Student Satisfaction Trends")
        .and_then(|c| trend_note(c, "Average satisfaction"))
    {
        notes.push(note);
    }
    if let Some(note) =
        chart(dashboard, "Enrollment Breakdown by Department").and_then(enrollment_note)
    {
        notes.push(note);
    }
    if let Some(note) = chart(dashboard, "Spring vs. Fall Term Trends").and_then(term_note) {
        notes.push(note);
    }

    notes
}

fn chart<'a>(dashboard: &'a Dashboard, title: &str) -> Option<&'a ChartSpec> {
    dashboard.charts.iter().find(|chart| chart.title == title)
}

fn trend_note(chart: &ChartSpec, label: &str) -> Option<String> {
    let metric = chart.y.first()?;
    let first = chart.data.first()?;
    let last = chart.data.last()?;
    let start_year = first.get(chart.x.as_str())?.as_i64()?;
    let end_year = last.get(chart.x.as_str())?.as_i64()?;
    if start_year == end_year {
        return None;
    }
    let start = first.get(metric.as_str())?.as_f64()?;
    let end = last.get(metric.as_str())?.as_f64()?;

    let note = if end > start {
        format!("{label} rose from {start:.2} in {start_year} to {end:.2} in {end_year}.")
    } else if end < start {
        format!("{label} fell from {start:.2} in {start_year} to {end:.2} in {end_year}.")
    } else {
        format!("{label} held steady at {end:.2} between {start_year} and {end_year}.")
    };
    Some(note)
}

fn enrollment_note(chart: &ChartSpec) -> Option<String> {
    let metric = chart.y.first()?;
    let best = chart
        .data
        .iter()
        .max_by_key(|row| row.get(metric.as_str()).and_then(Value::as_i64))?;
    let department = best.get(chart.x.as_str())?.as_str()?;
    let enrollments = best.get(metric.as_str())?.as_i64()?;
    Some(format!(
        "{department} leads enrollment for the current selection with {enrollments} enrollments."
    ))
}

fn term_note(chart: &ChartSpec) -> Option<String> {
    let best = chart
        .data
        .iter()
        .max_by_key(|row| row.get("Applications").and_then(Value::as_i64))?;
    let term = best.get(chart.x.as_str())?.as_str()?;
    let applications = best.get("Applications")?.as_i64()?;
    Some(format!(
        "The {term} term accounts for the most applications overall ({applications})."
    ))
}
