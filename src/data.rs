use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::MetricRecord;

pub const DATA_FILE: &str = "university_student_dashboard_data.csv";

pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Year",
    "Term",
    "Department",
    "Applications",
    "Admissions",
    "Enrollments",
    "Retention Rate",
    "Satisfaction Score",
];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not open {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is missing required columns: {}", missing.join(", "))]
    MissingColumns { path: String, missing: Vec<String> },
    #[error("could not parse {path}")]
    Parse {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path} already exists, refusing to overwrite it")]
    AlreadyExists { path: String },
    #[error("could not write {path}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
}

static DATASET: OnceLock<Vec<MetricRecord>> = OnceLock::new();

// Loaded once per process; later calls return the cached rows without
// touching the file again.
pub fn load() -> Result<&'static [MetricRecord], DataError> {
    if let Some(rows) = DATASET.get() {
        debug!(rows = rows.len(), "serving cached dataset");
        return Ok(rows);
    }

    let rows = read_csv(Path::new(DATA_FILE))?;
    info!(rows = rows.len(), path = DATA_FILE, "dataset loaded");
    Ok(DATASET.get_or_init(|| rows))
}

fn read_csv(path: &Path) -> Result<Vec<MetricRecord>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| DataError::Parse {
            path: path.display().to_string(),
            source,
        })?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns {
            path: path.display().to_string(),
            missing,
        });
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<MetricRecord>() {
        let row = result.map_err(|source| DataError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn distinct_terms(rows: &[MetricRecord]) -> Vec<String> {
    distinct(rows.iter().map(|row| row.term.as_str()))
}

pub fn distinct_departments(rows: &[MetricRecord]) -> Vec<String> {
    distinct(rows.iter().map(|row| row.department.as_str()))
}

// First-appearance order, so the selector domains follow the source file.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

pub fn write_starter_dataset(path: &Path) -> Result<usize, DataError> {
    if path.exists() {
        return Err(DataError::AlreadyExists {
            path: path.display().to_string(),
        });
    }

    let rows = starter_rows();
    let mut writer = csv::Writer::from_path(path).map_err(|source| DataError::Write {
        path: path.display().to_string(),
        source,
    })?;
    for row in &rows {
        writer.serialize(row).map_err(|source| DataError::Write {
            path: path.display().to_string(),
            source,
        })?;
    }
    writer.flush().map_err(|source| DataError::Write {
        path: path.display().to_string(),
        source: source.into(),
    })?;

    Ok(rows.len())
}

fn starter_rows() -> Vec<MetricRecord> {
    let rows = vec![
        (2021, "Fall", "Engineering", 870, 430, 310, 86.5, 4.0),
        (2021, "Fall", "Business", 640, 350, 240, 83.1, 3.8),
        (2021, "Fall", "Arts", 380, 260, 180, 80.4, 4.1),
        (2021, "Fall", "Science", 510, 300, 210, 84.7, 3.9),
        (2021, "Spring", "Engineering", 690, 360, 250, 85.9, 3.9),
        (2021, "Spring", "Business", 520, 290, 200, 82.6, 3.7),
        (2021, "Spring", "Arts", 300, 210, 140, 79.8, 4.0),
        (2021, "Spring", "Science", 410, 250, 170, 84.0, 3.8),
        (2022, "Fall", "Engineering", 910, 450, 330, 87.2, 4.1),
        (2022, "Fall", "Business", 660, 360, 250, 83.8, 3.9),
        (2022, "Fall", "Arts", 360, 250, 170, 81.0, 4.2),
        (2022, "Fall", "Science", 540, 310, 220, 85.3, 4.0),
        (2022, "Spring", "Engineering", 720, 380, 270, 86.6, 4.0),
        (2022, "Spring", "Business", 540, 300, 210, 83.2, 3.8),
        (2022, "Spring", "Arts", 290, 200, 130, 80.2, 4.1),
        (2022, "Spring", "Science", 430, 260, 180, 84.8, 3.9),
        (2023, "Fall", "Engineering", 950, 470, 340, 88.0, 4.2),
        (2023, "Fall", "Business", 680, 370, 260, 84.5, 4.0),
        (2023, "Fall", "Arts", 350, 240, 160, 81.6, 4.3),
        (2023, "Fall", "Science", 570, 320, 230, 86.1, 4.1),
        (2023, "Spring", "Engineering", 750, 390, 280, 87.4, 4.1),
        (2023, "Spring", "Business", 560, 310, 220, 83.9, 3.9),
        (2023, "Spring", "Arts", 280, 190, 130, 80.9, 4.2),
        (2023, "Spring", "Science", 450, 270, 190, 85.5, 4.0),
    ];

    rows.into_iter()
        .map(
            |(year, term, department, applications, admissions, enrollments, retention, satisfaction)| {
                MetricRecord {
                    year,
                    term: term.to_string(),
                    department: department.to_string(),
                    applications,
                    admissions,
                    enrollments,
                    retention_rate: Some(retention),
                    satisfaction_score: Some(satisfaction),
                }
            },
        )
        .collect()
}
