use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{MailError, MailResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recipient {
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
}

impl Recipient {
    pub fn new(email: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
        }
    }
}

fn malformed(err: csv::Error) -> MailError {
    let line = err.position().map_or(0, |position| position.line());
    MailError::MalformedRow {
        line,
        reason: err.to_string(),
    }
}

/// Parse `email,firstName` rows after a header line. Fields may be quoted.
pub fn parse_recipients(contents: &str) -> MailResult<Vec<Recipient>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());
    let headers = reader.headers().map_err(malformed)?.clone();

    let mut recipients = Vec::new();
    for row in reader.records() {
        let record = row.map_err(malformed)?;
        let line = record.position().map_or(0, |position| position.line());
        let recipient: Recipient = record.deserialize(Some(&headers)).map_err(|err| {
            MailError::MalformedRow {
                line,
                reason: err.to_string(),
            }
        })?;
        if recipient.email.is_empty() {
            return Err(MailError::MalformedRow {
                line,
                reason: "empty email".to_string(),
            });
        }
        recipients.push(recipient);
    }
    Ok(recipients)
}

pub fn load_recipients(path: &Path) -> MailResult<Vec<Recipient>> {
    let contents = fs::read_to_string(path).map_err(|source| MailError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_recipients(&contents)
}

/// Keep the first occurrence of each address, compared case-insensitively.
pub fn dedup_recipients(recipients: Vec<Recipient>) -> Vec<Recipient> {
    let mut seen = HashSet::new();
    recipients
        .into_iter()
        .filter(|recipient| {
            let fresh = seen.insert(recipient.email.to_lowercase());
            if !fresh {
                tracing::warn!(email = %recipient.email, "skipping duplicate");
            }
            fresh
        })
        .collect()
}
