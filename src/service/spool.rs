// SPDX-License-Identifier: MIT

//! File-spool message service: every accepted message becomes one JSON
//! record in an outbox directory, written to a temp file and renamed into
//! place so a half-written record is never picked up.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::models::recipient::{Recipient, address_is_valid, message_is_valid};
use crate::service::{MessageService, SendOutcome};

/// On-disk record for one spooled message.
#[derive(Debug, Serialize)]
struct SpoolRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    to: &'a str,
    label: &'a str,
    message: &'a str,
    queued_at: String,
}

/// Message service backed by a local outbox directory.
pub struct SpoolService {
    outbox: PathBuf,
    sequence: AtomicU64,
}

impl SpoolService {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self {
            outbox: outbox.into(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn outbox(&self) -> &PathBuf {
        &self.outbox
    }

    /// Stage one: serialize and write every record to a temp file inside the
    /// outbox. Returns (temp path, final path) pairs ready to commit.
    fn create_records(
        &self,
        recipients: &[Recipient],
        from: Option<&str>,
    ) -> Result<Vec<(PathBuf, PathBuf)>> {
        fs::create_dir_all(&self.outbox)
            .with_context(|| format!("Failed to create outbox {}", self.outbox.display()))?;

        let queued_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("Failed to format queue timestamp")?;

        let mut staged = Vec::with_capacity(recipients.len());
        for rcp in recipients {
            let record = SpoolRecord {
                from,
                to: &rcp.address,
                label: &rcp.label,
                message: &rcp.message,
                queued_at: queued_at.clone(),
            };
            let json = serde_json::to_vec_pretty(&record)
                .with_context(|| format!("Failed to serialize message for {}", rcp.address))?;

            let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
            let name = format!("{seq:06}-{}.json", Uuid::new_v4());
            let final_path = self.outbox.join(&name);
            let tmp_path = self.outbox.join(format!("{name}.tmp"));

            fs::write(&tmp_path, json)
                .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
            staged.push((tmp_path, final_path));
        }

        Ok(staged)
    }

    /// Stage two: rename every staged record into place. On a failure the
    /// not-yet-renamed temp files are removed so a rejected batch does not
    /// strand half-written records next to the committed ones.
    fn commit_records(staged: Vec<(PathBuf, PathBuf)>) -> Result<()> {
        let mut staged = staged.into_iter();
        while let Some((tmp_path, final_path)) = staged.next() {
            if let Err(err) = fs::rename(&tmp_path, &final_path) {
                let _ = fs::remove_file(&tmp_path);
                for (tmp_path, _) in staged {
                    let _ = fs::remove_file(&tmp_path);
                }
                return Err(err)
                    .with_context(|| format!("Failed to commit {}", final_path.display()));
            }
        }
        Ok(())
    }
}

impl MessageService for SpoolService {
    fn send_messages(&self, recipients: &[Recipient], from: Option<&str>) -> SendOutcome {
        if let Some(from) = from
            && !address_is_valid(from)
        {
            return SendOutcome::InvalidAddress;
        }

        for rcp in recipients {
            if !address_is_valid(&rcp.address) {
                return SendOutcome::InvalidAddress;
            }
            if !message_is_valid(&rcp.message) {
                return SendOutcome::InvalidMessage;
            }
        }

        // One message per address per send operation.
        let mut seen = Vec::<String>::new();
        for rcp in recipients {
            let lower = rcp.address.trim().to_ascii_lowercase();
            if seen.contains(&lower) {
                return SendOutcome::DuplicateAddress;
            }
            seen.push(lower);
        }

        let staged = match self.create_records(recipients, from) {
            Ok(staged) => staged,
            Err(_) => return SendOutcome::CreationFailed,
        };

        match Self::commit_records(staged) {
            Ok(()) => SendOutcome::Ok,
            Err(_) => SendOutcome::CommitFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rcp(address: &str, message: &str) -> Recipient {
        Recipient::new(address, "Label", message)
    }

    fn spooled_files(dir: &std::path::Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn spools_one_record_per_recipient() {
        let tmp = TempDir::new().unwrap();
        let service = SpoolService::new(tmp.path().join("outbox"));

        let outcome = service.send_messages(
            &[rcp("a@example.org", "one"), rcp("b@example.org", "two")],
            None,
        );

        assert_eq!(outcome, SendOutcome::Ok);
        let files = spooled_files(service.outbox());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "json"));
    }

    #[test]
    fn record_contains_sender_when_given() {
        let tmp = TempDir::new().unwrap();
        let service = SpoolService::new(tmp.path().join("outbox"));

        let outcome = service.send_messages(&[rcp("a@example.org", "hi")], Some("me@example.org"));

        assert_eq!(outcome, SendOutcome::Ok);
        let files = spooled_files(service.outbox());
        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
        assert_eq!(record["from"], "me@example.org");
        assert_eq!(record["to"], "a@example.org");
        assert_eq!(record["message"], "hi");
        assert!(record["queued_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn anonymous_record_omits_sender() {
        let tmp = TempDir::new().unwrap();
        let service = SpoolService::new(tmp.path().join("outbox"));

        service.send_messages(&[rcp("a@example.org", "hi")], None);

        let files = spooled_files(service.outbox());
        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
        assert!(record.get("from").is_none());
    }

    #[test]
    fn rejects_invalid_recipient_address_without_writing() {
        let tmp = TempDir::new().unwrap();
        let service = SpoolService::new(tmp.path().join("outbox"));

        let outcome = service.send_messages(
            &[rcp("a@example.org", "hi"), rcp("broken", "hi")],
            None,
        );

        assert_eq!(outcome, SendOutcome::InvalidAddress);
        assert!(!service.outbox().exists());
    }

    #[test]
    fn rejects_invalid_sender_address() {
        let tmp = TempDir::new().unwrap();
        let service = SpoolService::new(tmp.path().join("outbox"));

        let outcome = service.send_messages(&[rcp("a@example.org", "hi")], Some("nope"));

        assert_eq!(outcome, SendOutcome::InvalidAddress);
    }

    #[test]
    fn rejects_empty_message() {
        let tmp = TempDir::new().unwrap();
        let service = SpoolService::new(tmp.path().join("outbox"));

        let outcome = service.send_messages(&[rcp("a@example.org", "  ")], None);

        assert_eq!(outcome, SendOutcome::InvalidMessage);
    }

    #[test]
    fn rejects_duplicate_addresses_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        let service = SpoolService::new(tmp.path().join("outbox"));

        let outcome = service.send_messages(
            &[rcp("a@example.org", "one"), rcp("A@Example.org", "two")],
            None,
        );

        assert_eq!(outcome, SendOutcome::DuplicateAddress);
        assert!(!service.outbox().exists());
    }

    #[test]
    fn failed_commit_removes_stranded_temp_files() {
        let tmp = TempDir::new().unwrap();
        let first_tmp = tmp.path().join("a.json.tmp");
        let second_tmp = tmp.path().join("b.json.tmp");
        fs::write(&first_tmp, b"{}").unwrap();
        fs::write(&second_tmp, b"{}").unwrap();
        // Rename targets in a missing directory force the commit to fail.
        let staged = vec![
            (first_tmp.clone(), tmp.path().join("missing").join("a.json")),
            (second_tmp.clone(), tmp.path().join("missing").join("b.json")),
        ];

        assert!(SpoolService::commit_records(staged).is_err());

        assert!(!first_tmp.exists());
        assert!(!second_tmp.exists());
    }

    #[test]
    fn unwritable_outbox_maps_to_creation_failed() {
        let tmp = TempDir::new().unwrap();
        // A plain file where the outbox directory should be.
        let blocker = tmp.path().join("outbox");
        fs::write(&blocker, b"not a directory").unwrap();
        let service = SpoolService::new(&blocker);

        let outcome = service.send_messages(&[rcp("a@example.org", "hi")], None);

        assert_eq!(outcome, SendOutcome::CreationFailed);
    }
}
