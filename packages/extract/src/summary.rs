//! Batch summary: identified vs. placeholder counts and files per suite.
//!
//! A batch that is mostly placeholders usually means the layout changed,
//! so the counts are what operators look at first.

use std::collections::BTreeMap;

use bill_splitter_bill_models::{BatchSummary, FilenameAssignment, SuiteGroup};

/// Summarizes resolved filenames for a batch.
///
/// Suites are ordered by length and then lexically, so `"200"` sorts
/// before `"1105"` and `"Page10"` after `"Page9"`.
#[must_use]
pub fn summarize(assignments: &[FilenameAssignment<'_>]) -> BatchSummary {
    let placeholders = assignments
        .iter()
        .filter(|a| a.record.is_placeholder())
        .count();

    let mut groups: BTreeMap<(usize, &str), SuiteGroup> = BTreeMap::new();
    for assignment in assignments {
        let suite = assignment.record.suite.as_str();
        groups
            .entry((suite.chars().count(), suite))
            .or_insert_with(|| SuiteGroup {
                suite: suite.to_owned(),
                tenant: assignment.record.tenant.clone(),
                files: Vec::new(),
            })
            .files
            .push((assignment.record.page, assignment.filename.clone()));
    }

    BatchSummary {
        total: assignments.len(),
        identified: assignments.len() - placeholders,
        placeholders,
        suites: groups.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use bill_splitter_bill_models::{BillCategory, BillRecord};

    use super::*;
    use crate::filename::resolve;

    fn record(page: u32, suite: &str, tenant: &str) -> BillRecord {
        BillRecord {
            page,
            suite: suite.to_owned(),
            tenant: tenant.to_owned(),
            bill_type: BillCategory::Water,
            period: "June 2025".to_owned(),
        }
    }

    #[test]
    fn counts_placeholders() {
        let records = vec![
            record(1, "1105", "Cafe Dulce"),
            BillRecord::placeholder(2, BillCategory::Water, "June 2025"),
            record(3, "200", "Gap Kids"),
        ];
        let summary = summarize(&resolve(&records));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.identified, 2);
        assert_eq!(summary.placeholders, 1);
    }

    #[test]
    fn orders_suites_by_length_then_value() {
        let records = vec![
            record(1, "1105", "Cafe Dulce"),
            record(2, "200", "Gap Kids"),
            record(3, "1100A", "Blue Bottle"),
            record(4, "1050", "Lush"),
        ];
        let summary = summarize(&resolve(&records));
        let suites: Vec<&str> = summary.suites.iter().map(|g| g.suite.as_str()).collect();
        assert_eq!(suites, vec!["200", "1050", "1105", "1100A"]);
    }

    #[test]
    fn groups_pages_under_first_tenant() {
        let records = vec![
            record(1, "200", "Gap Kids"),
            record(2, "310", "Lush Cosmetics"),
            record(3, "200", "Gap Kids Outlet"),
        ];
        let summary = summarize(&resolve(&records));
        let group = &summary.suites[0];
        assert_eq!(group.suite, "200");
        assert_eq!(group.tenant, "Gap Kids");
        let pages: Vec<u32> = group.files.iter().map(|(page, _)| *page).collect();
        assert_eq!(pages, vec![1, 3]);
    }

    #[test]
    fn empty_batch_has_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.identified, 0);
        assert!(summary.suites.is_empty());
    }
}
