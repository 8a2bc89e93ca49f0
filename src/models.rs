use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Term")]
    pub term: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Applications")]
    pub applications: i64,
    #[serde(rename = "Admissions")]
    pub admissions: i64,
    #[serde(rename = "Enrollments")]
    pub enrollments: i64,
    // Blank cells deserialize to None and are skipped by the mean reducers.
    #[serde(rename = "Retention Rate")]
    pub retention_rate: Option<f64>,
    #[serde(rename = "Satisfaction Score")]
    pub satisfaction_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentEnrollment {
    pub department: String,
    pub enrollments: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermTotals {
    pub term: String,
    pub applications: i64,
    pub admissions: i64,
    pub enrollments: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentComparison {
    pub department: String,
    pub retention_rate: Option<f64>,
    pub satisfaction_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiSummary {
    pub total_applications: i64,
    pub total_admissions: i64,
    pub total_enrollments: i64,
}
