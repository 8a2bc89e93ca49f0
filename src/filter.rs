use std::collections::HashSet;

use crate::models::MetricRecord;

// Row included iff its term matches and its department is selected.
// An unknown term or an empty department set simply yields an empty view.
pub fn filter_rows(
    rows: &[MetricRecord],
    term: &str,
    departments: &HashSet<String>,
) -> Vec<MetricRecord> {
    rows.iter()
        .filter(|row| row.term == term && departments.contains(&row.department))
        .cloned()
        .collect()
}

pub fn department_set(departments: &[String]) -> HashSet<String> {
    departments.iter().cloned().collect()
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

    fn sample_rows() -> Vec<MetricRecord> {
        vec![
            record(2021, "Fall", "CS"),
            record(2021, "Fall", "Math"),
            record(2022, "Spring", "CS"),
        ]
    }

    #[test]
    fn filtered_rows_satisfy_the_predicate_in_source_order() {
        let rows = sample_rows();
        let departments = department_set(&["CS".to_string(), "Math".to_string()]);

        let filtered = filter_rows(&rows, "Fall", &departments);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].department, "CS");
        assert_eq!(filtered[1].department, "Math");
        assert!(filtered.iter().all(|row| row.term == "Fall"));
        assert!(filtered.iter().all(|row| rows.contains(row)));
    }

    #[test]
    fn department_subset_narrows_the_view() {
        let rows = sample_rows();
        let departments = department_set(&["Math".to_string()]);

        let filtered = filter_rows(&rows, "Fall", &departments);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].department, "Math");
    }

    #[test]
    fn unknown_term_yields_an_empty_view() {
        let rows = sample_rows();
        let departments = department_set(&["CS".to_string()]);

        assert!(filter_rows(&rows, "Summer", &departments).is_empty());
    }

    #[test]
    fn empty_department_set_yields_an_empty_view() {
        let rows = sample_rows();

        assert!(filter_rows(&rows, "Fall", &HashSet::new()).is_empty());
    }

    #[test]
    fn filtering_twice_gives_identical_views() {
        let rows = sample_rows();
        let departments = department_set(&["CS".to_string(), "Math".to_string()]);

        let first = filter_rows(&rows, "Fall", &departments);
        let second = filter_rows(&rows, "Fall", &departments);

        assert_eq!(first, second);
    }
}
