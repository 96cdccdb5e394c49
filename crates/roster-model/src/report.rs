//! Certificate-list report export.

use crate::outcome::UploadOutcome;

/// Filename the report is exposed under.
pub const REPORT_FILENAME: &str = "certificate-urls.csv";

/// Serialize the run's successful outcomes into a tabular report.
///
/// One header row, then one row per outcome in append order. Fields are
/// comma-joined with no quoting or escaping, so embedded commas in names
/// or URLs shift columns; known limitation carried over from the original
/// export format.
pub fn certificate_list_csv(outcomes: &[UploadOutcome]) -> String {
    let mut lines = Vec::with_capacity(outcomes.len() + 1);
    lines.push("Name,Email,Contact Number,Certificate URL,Upload Date".to_string());

    for outcome in outcomes {
        lines.push(format!(
            "{},{},{},{},{}",
            outcome.entry.certificate_name,
            outcome.entry.email,
            outcome.entry.contact_number,
            outcome.url().unwrap_or(""),
            outcome.uploaded_at().unwrap_or(""),
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RosterEntry;

    fn success(name: &str, url: &str) -> UploadOutcome {
        let entry = RosterEntry::new(
            format!("{name}@example.com"),
            name,
            format!("{name}@example.com"),
            "555-0100",
            "2025-06-22 22:22:03",
        );
        let filename = entry.certificate_filename();
        UploadOutcome::success(entry, filename, url, "2025-06-23T08:00:00Z")
    }

    #[test]
    fn report_has_header_plus_one_row_per_outcome() {
        let outcomes = vec![
            success("Alice", "https://example.com/a"),
            success("Bob", "https://example.com/b"),
            success("Carol", "https://example.com/c"),
        ];
        let report = certificate_list_csv(&outcomes);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Name,Email,Contact Number,Certificate URL,Upload Date"
        );
        assert!(lines[1].starts_with("Alice,"));
        assert!(lines[2].starts_with("Bob,"));
        assert!(lines[3].starts_with("Carol,"));
    }

    #[test]
    fn rows_preserve_append_order_and_fields() {
        let outcomes = vec![success("Bob", "https://example.com/b")];
        let report = certificate_list_csv(&outcomes);
        assert_eq!(
            report.lines().nth(1).unwrap(),
            "Bob,Bob@example.com,555-0100,https://example.com/b,2025-06-23T08:00:00Z"
        );
    }

    #[test]
    fn empty_outcome_list_yields_header_only() {
        let report = certificate_list_csv(&[]);
        assert_eq!(
            report,
            "Name,Email,Contact Number,Certificate URL,Upload Date"
        );
    }

    #[test]
    fn fields_are_not_escaped() {
        let entry = RosterEntry::new("x@y.z", "Doe, John", "x@y.z", "", "");
        let filename = entry.certificate_filename();
        let outcome = UploadOutcome::success(entry, filename, "https://example.com/x", "t");
        let report = certificate_list_csv(&[outcome]);
        // The embedded comma is emitted verbatim; consumers see a shifted
        // column. Documented limitation.
        assert!(report.lines().nth(1).unwrap().starts_with("Doe, John,"));
    }
}
