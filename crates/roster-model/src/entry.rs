//! Roster entries and the built-in sample roster.

use serde::{Deserialize, Serialize};

/// One person to generate a certificate for.
///
/// Created by roster ingestion and never mutated afterward; the pipeline
/// consumes entries read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Identity key, derived from the email column (fallback column when
    /// the primary is absent). May be empty if the source row had neither.
    pub id: String,

    /// Name rendered onto the certificate.
    pub certificate_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number, as found in the source.
    pub contact_number: String,

    /// Raw submission timestamp string from the source row.
    pub confirmed_at: String,
}

impl RosterEntry {
    pub fn new(
        id: impl Into<String>,
        certificate_name: impl Into<String>,
        email: impl Into<String>,
        contact_number: impl Into<String>,
        confirmed_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            certificate_name: certificate_name.into(),
            email: email.into(),
            contact_number: contact_number.into(),
            confirmed_at: confirmed_at.into(),
        }
    }

    /// Artifact filename derived from the certificate name.
    ///
    /// Two entries with the same name yield the same filename; the
    /// pipeline deliberately does not deduplicate.
    pub fn certificate_filename(&self) -> String {
        format!("{}_certificate.png", self.certificate_name)
    }
}

/// The fixed example roster substituted when a run is requested with no
/// roster loaded.
pub fn sample_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new(
            "john@example.com",
            "John Doe",
            "john@example.com",
            "+94757711901",
            "2025-06-22 22:22:03",
        ),
        RosterEntry::new(
            "jane@example.com",
            "Jane Smith",
            "jane@example.com",
            "0704300340",
            "2025-06-22 22:32:24",
        ),
        RosterEntry::new(
            "bob@example.com",
            "Bob Johnson",
            "bob@example.com",
            "07797710811",
            "2025-06-22 22:40:30",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_derived_from_certificate_name() {
        let entry = RosterEntry::new("a@b.c", "John Doe", "a@b.c", "", "");
        assert_eq!(entry.certificate_filename(), "John Doe_certificate.png");
    }

    #[test]
    fn sample_roster_has_three_fixed_entries() {
        let roster = sample_roster();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].certificate_name, "John Doe");
        assert_eq!(roster[1].certificate_name, "Jane Smith");
        assert_eq!(roster[2].certificate_name, "Bob Johnson");
    }
}
