//! Roster ingestion from tabular (CSV) data.
//!
//! Recognized source columns: `Certificate Name`, `Email address`
//! (fallback `Email Address2`), `Contact Number`, `Timestamp`. Missing
//! columns yield empty-string fields, never an error; only a structurally
//! malformed file is rejected. The pipeline downstream therefore only
//! ever sees well-formed (possibly empty) entries.

use certmill_common::{CertmillError, CertmillResult};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::entry::RosterEntry;

const COL_NAME: &str = "Certificate Name";
const COL_EMAIL: &str = "Email address";
const COL_EMAIL_FALLBACK: &str = "Email Address2";
const COL_CONTACT: &str = "Contact Number";
const COL_TIMESTAMP: &str = "Timestamp";

/// Parse an uploaded roster file into ordered entries.
pub fn parse_roster(bytes: &[u8]) -> CertmillResult<Vec<RosterEntry>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| CertmillError::roster(format!("Failed to read roster header: {e}")))?
        .clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let name_col = position(COL_NAME);
    let email_col = position(COL_EMAIL);
    let email_fallback_col = position(COL_EMAIL_FALLBACK);
    let contact_col = position(COL_CONTACT);
    let timestamp_col = position(COL_TIMESTAMP);

    let mut roster = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| CertmillError::roster(format!("Malformed roster row: {e}")))?;

        let email = {
            let primary = field(&record, email_col);
            if primary.is_empty() {
                field(&record, email_fallback_col)
            } else {
                primary
            }
        };

        roster.push(RosterEntry {
            id: email.clone(),
            certificate_name: field(&record, name_col),
            email,
            contact_number: field(&record, contact_col),
            confirmed_at: field(&record, timestamp_col),
        });
    }

    tracing::debug!(entries = roster.len(), "Parsed roster");
    Ok(roster)
}

fn field(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .to_string()
}
