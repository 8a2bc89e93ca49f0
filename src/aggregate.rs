use std::collections::HashMap;

use crate::models::{
    DepartmentComparison, DepartmentEnrollment, KpiSummary, MetricRecord, TermTotals, TrendPoint,
};

pub fn kpis(filtered: &[MetricRecord]) -> KpiSummary {
    let mut summary = KpiSummary::default();
    for row in filtered {
        summary.total_applications += row.applications;
        summary.total_admissions += row.admissions;
        summary.total_enrollments += row.enrollments;
    }
    summary
}

pub fn retention_trend(rows: &[MetricRecord]) -> Vec<TrendPoint> {
    mean_by_year(rows, |row| row.retention_rate)
}

pub fn satisfaction_trend(rows: &[MetricRecord]) -> Vec<TrendPoint> {
    mean_by_year(rows, |row| row.satisfaction_score)
}

// A year with no non-null values never gets an entry, so it is omitted
// from the trend rather than averaged over zero rows.
fn mean_by_year(
    rows: &[MetricRecord],
    metric: impl Fn(&MetricRecord) -> Option<f64>,
) -> Vec<TrendPoint> {
    let mut groups: HashMap<i32, (f64, usize)> = HashMap::new();
    for row in rows {
        if let Some(value) = metric(row) {
            let entry = groups.entry(row.year).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let mut points: Vec<TrendPoint> = groups
        .into_iter()
        .map(|(year, (total, count))| TrendPoint {
            year,
            value: total / count as f64,
        })
        .collect();
    points.sort_by_key(|point| point.year);
    points
}

pub fn department_enrollment(filtered: &[MetricRecord]) -> Vec<DepartmentEnrollment> {
    let mut groups: HashMap<String, i64> = HashMap::new();
    for row in filtered {
        *groups.entry(row.department.clone()).or_insert(0) += row.enrollments;
    }

    let mut totals: Vec<DepartmentEnrollment> = groups
        .into_iter()
        .map(|(department, enrollments)| DepartmentEnrollment {
            department,
            enrollments,
        })
        .collect();
    totals.sort_by(|a, b| a.department.cmp(&b.department));
    totals
}

pub fn term_totals(rows: &[MetricRecord]) -> Vec<TermTotals> {
    let mut groups: HashMap<String, (i64, i64, i64)> = HashMap::new();
    for row in rows {
        let entry = groups.entry(row.term.clone()).or_insert((0, 0, 0));
        entry.0 += row.applications;
        entry.1 += row.admissions;
        entry.2 += row.enrollments;
    }

    let mut totals: Vec<TermTotals> = groups
        .into_iter()
        .map(|(term, (applications, admissions, enrollments))| TermTotals {
            term,
            applications,
            admissions,
            enrollments,
        })
        .collect();
    totals.sort_by(|a, b| a.term.cmp(&b.term));
    totals
}

pub fn department_comparison(rows: &[MetricRecord]) -> Vec<DepartmentComparison> {
    let mut groups: HashMap<String, ((f64, usize), (f64, usize))> = HashMap::new();
    for row in rows {
        let entry = groups
            .entry(row.department.clone())
            .or_insert(((0.0, 0), (0.0, 0)));
        if let Some(value) = row.retention_rate {
            entry.0 .0 += value;
            entry.0 .1 += 1;
        }
        if let Some(value) = row.satisfaction_score {
            entry.1 .0 += value;
            entry.1 .1 += 1;
        }
    }

    let mut comparisons: Vec<DepartmentComparison> = groups
        .into_iter()
        .map(|(department, (retention, satisfaction))| DepartmentComparison {
            department,
            retention_rate: mean_of(retention),
            satisfaction_score: mean_of(satisfaction),
        })
        .collect();
    comparisons.sort_by(|a, b| a.department.cmp(&b.department));
    comparisons
}

fn mean_of((total, count): (f64, usize)) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}
