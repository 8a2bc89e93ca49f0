use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::aggregate;
use crate::data;
use crate::models::MetricRecord;

pub const DASHBOARD_TITLE: &str = "University Admissions, Retention & Satisfaction Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Line,
    GroupedBar,
    CategoryBar,
}

#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x: String,
    pub y: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub data: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub generated_on: NaiveDate,
    pub term: String,
    pub departments: Vec<String>,
    pub term_choices: Vec<String>,
    pub department_choices: Vec<String>,
    pub kpis: Vec<Kpi>,
    pub charts: Vec<ChartSpec>,
}

// Field selection only. The five chart bindings and three KPI labels are
// a fixed table; anything that could fail happens upstream of this layer.
pub fn build_dashboard(
    dataset: &[MetricRecord],
    filtered: &[MetricRecord],
    term: &str,
    departments: &[String],
) -> Dashboard {
    let summary = aggregate::kpis(filtered);

    Dashboard {
        title: DASHBOARD_TITLE.to_string(),
        generated_on: Utc::now().date_naive(),
        term: term.to_string(),
        departments: departments.to_vec(),
        term_choices: data::distinct_terms(dataset),
        department_choices: data::distinct_departments(dataset),
        kpis: vec![
            Kpi {
                label: "Total Applications".to_string(),
                value: summary.total_applications,
            },
            Kpi {
                label: "Total Admissions".to_string(),
                value: summary.total_admissions,
            },
            Kpi {
                label: "Total Enrollments".to_string(),
                value: summary.total_enrollments,
            },
        ],
        charts: vec![
            retention_chart(dataset),
            satisfaction_chart(dataset),
            enrollment_chart(filtered),
            term_totals_chart(dataset),
            comparison_chart(dataset),
        ],
    }
}

fn retention_chart(dataset: &[MetricRecord]) -> ChartSpec {
    let data = aggregate::retention_trend(dataset)
        .into_iter()
        .map(|point| {
            data_row(&[
                ("Year", json!(point.year)),
                ("Retention Rate", json!(point.value)),
            ])
        })
        .collect();

    ChartSpec {
        title: "Retention Rate Over Time".to_string(),
        kind: ChartKind::Line,
        x: "Year".to_string(),
        y: vec!["Retention Rate".to_string()],
        color: None,
        data,
    }
}

fn satisfaction_chart(dataset: &[MetricRecord]) -> ChartSpec {
    let data = aggregate::satisfaction_trend(dataset)
        .into_iter()
        .map(|point| {
            data_row(&[
                ("Year", json!(point.year)),
                ("Satisfaction Score", json!(point.value)),
            ])
        })
        .collect();

    ChartSpec {
        title: "Student Satisfaction Trends".to_string(),
        kind: ChartKind::Line,
        x: "Year".to_string(),
        y: vec!["Satisfaction Score".to_string()],
        color: None,
        data,
    }
}

fn enrollment_chart(filtered: &[MetricRecord]) -> ChartSpec {
    let data = aggregate::department_enrollment(filtered)
        .into_iter()
        .map(|row| {
            data_row(&[
                ("Department", json!(row.department)),
                ("Enrollments", json!(row.enrollments)),
            ])
        })
        .collect();

    ChartSpec {
        title: "Enrollment Breakdown by Department".to_string(),
        kind: ChartKind::CategoryBar,
        x: "Department".to_string(),
        y: vec!["Enrollments".to_string()],
        color: Some("Department".to_string()),
        data,
    }
}

fn term_totals_chart(dataset: &[MetricRecord]) -> ChartSpec {
    let data = aggregate::term_totals(dataset)
        .into_iter()
        .map(|row| {
            data_row(&[
                ("Term", json!(row.term)),
                ("Applications", json!(row.applications)),
                ("Admissions", json!(row.admissions)),
                ("Enrollments", json!(row.enrollments)),
            ])
        })
        .collect();

    ChartSpec {
        title: "Spring vs. Fall Term Trends".to_string(),
        kind: ChartKind::GroupedBar,
        x: "Term".to_string(),
        y: vec![
            "Applications".to_string(),
            "Admissions".to_string(),
            "Enrollments".to_string(),
        ],
        color: None,
        data,
    }
}

fn comparison_chart(dataset: &[MetricRecord]) -> ChartSpec {
    let data = aggregate::department_comparison(dataset)
        .into_iter()
        .map(|row| {
            data_row(&[
                ("Department", json!(row.department)),
                ("Retention Rate", json!(row.retention_rate)),
                ("Satisfaction Score", json!(row.satisfaction_score)),
            ])
        })
        .collect();

    ChartSpec {
        title: "Department-wise Retention & Satisfaction".to_string(),
        kind: ChartKind::GroupedBar,
        x: "Department".to_string(),
        y: vec![
            "Retention Rate".to_string(),
            "Satisfaction Score".to_string(),
        ],
        color: None,
        data,
    }
}

fn data_row(fields: &[(&str, Value)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, term: &str, department: &str) -> MetricRecord {
        MetricRecord {
            year,
            term: term.to_string(),
            department: department.to_string(),
            applications: 100,
            admissions: 50,
            enrollments: 40,
            retention_rate: Some(0.8),
            satisfaction_score: Some(4.0),
        }
    }

    fn sample_dashboard() -> Dashboard {
        let dataset = vec![
            record(2021, "Fall", "CS"),
            record(2021, "Fall", "Math"),
            record(2022, "Spring", "CS"),
        ];
        let filtered = vec![record(2021, "Fall", "CS"), record(2021, "Fall", "Math")];
        build_dashboard(
            &dataset,
            &filtered,
            "Fall",
            &["CS".to_string(), "Math".to_string()],
        )
    }

    #[test]
    fn chart_bindings_match_the_dashboard_layout() {
        let dashboard = sample_dashboard();
        let charts = &dashboard.charts;

        assert_eq!(charts.len(), 5);

        assert_eq!(charts[0].title, "Retention Rate Over Time");
        assert_eq!(charts[0].kind, ChartKind::Line);
        assert_eq!(charts[0].x, "Year");
        assert_eq!(charts[0].y, vec!["Retention Rate"]);
        assert_eq!(charts[0].color, None);

        assert_eq!(charts[1].title, "Student Satisfaction Trends");
        assert_eq!(charts[1].kind, ChartKind::Line);
        assert_eq!(charts[1].x, "Year");
        assert_eq!(charts[1].y, vec!["Satisfaction Score"]);
        assert_eq!(charts[1].color, None);

        assert_eq!(charts[2].title, "Enrollment Breakdown by Department");
        assert_eq!(charts[2].kind, ChartKind::CategoryBar);
        assert_eq!(charts[2].x, "Department");
        assert_eq!(charts[2].y, vec!["Enrollments"]);
        assert_eq!(charts[2].color.as_deref(), Some("Department"));

        assert_eq!(charts[3].title, "Spring vs. Fall Term Trends");
        assert_eq!(charts[3].kind, ChartKind::GroupedBar);
        assert_eq!(charts[3].x, "Term");
        assert_eq!(
            charts[3].y,
            vec!["Applications", "Admissions", "Enrollments"]
        );
        assert_eq!(charts[3].color, None);

        assert_eq!(charts[4].title, "Department-wise Retention & Satisfaction");
        assert_eq!(charts[4].kind, ChartKind::GroupedBar);
        assert_eq!(charts[4].x, "Department");
        assert_eq!(charts[4].y, vec!["Retention Rate", "Satisfaction Score"]);
        assert_eq!(charts[4].color, None);
    }

    #[test]
    fn kpi_values_come_from_the_filtered_view() {
        let dashboard = sample_dashboard();

        let labels: Vec<&str> = dashboard.kpis.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Total Applications", "Total Admissions", "Total Enrollments"]
        );

        let values: Vec<i64> = dashboard.kpis.iter().map(|k| k.value).collect();
        assert_eq!(values, vec![200, 100, 80]);
    }

    #[test]
    fn chart_data_is_keyed_by_display_column_names() {
        let dashboard = sample_dashboard();
        let trend = &dashboard.charts[0].data;

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].get("Year"), Some(&json!(2021)));
        assert_eq!(trend[0].get("Retention Rate"), Some(&json!(0.8)));
    }

    #[test]
    fn empty_selection_keeps_trend_charts_populated() {
        let dataset = vec![record(2021, "Fall", "CS"), record(2022, "Spring", "CS")];

        let dashboard = build_dashboard(&dataset, &[], "Fall", &[]);

        assert!(dashboard.kpis.iter().all(|kpi| kpi.value == 0));
        assert!(dashboard.charts[2].data.is_empty());
        assert_eq!(dashboard.charts[0].data.len(), 2);
        assert_eq!(dashboard.charts[3].data.len(), 2);
    }

    #[test]
    fn selector_domains_cover_the_full_dataset() {
        let dashboard = sample_dashboard();

        assert_eq!(dashboard.term_choices, vec!["Fall", "Spring"]);
        assert_eq!(dashboard.department_choices, vec!["CS", "Math"]);
    }

    #[test]
    fn dashboard_payload_serializes_for_an_external_host() {
        let dashboard = sample_dashboard();

        let payload = serde_json::to_value(&dashboard).expect("payload serializes");
        assert_eq!(payload["title"], json!(DASHBOARD_TITLE));
        assert_eq!(payload["charts"][0]["kind"], json!("line"));
        assert_eq!(payload["charts"][3]["kind"], json!("grouped-bar"));
        assert_eq!(payload["charts"][2]["kind"], json!("category-bar"));
        assert_eq!(payload["charts"][2]["color"], json!("Department"));
    }
}
