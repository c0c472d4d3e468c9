// SPDX-License-Identifier: MIT

//! Business logic for assembling a submission batch.
//!
//! Responsibilities:
//! - Collect per-entry validation results into an all-or-nothing batch.
//! - Produce the human-readable confirmation summary shown before sending.

use crate::models::recipient::Recipient;

/// An ordered, non-empty set of validated recipients submitted together.
///
/// Only constructible through [`collect_batch`], so holding a `Batch` means
/// every contained recipient passed entry-local validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    recipients: Vec<Recipient>,
}

impl Batch {
    /// Recipients in the order their entries appeared in the form.
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Always false: an empty batch is never constructed.
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn into_recipients(self) -> Vec<Recipient> {
        self.recipients
    }
}

/// Fold per-entry validation results into a batch.
///
/// All-or-nothing: if any entry failed validation (`None`), or no entry
/// produced a recipient at all, the whole attempt is discarded. Partial
/// submission is intentionally not supported.
pub fn collect_batch(results: impl IntoIterator<Item = Option<Recipient>>) -> Option<Batch> {
    let mut recipients = Vec::new();

    for result in results {
        recipients.push(result?);
    }

    if recipients.is_empty() {
        return None;
    }

    Some(Batch { recipients })
}

/// Build the confirmation prompt body: one "message to label (address)" part
/// per recipient, in batch order, joined with " and ".
pub fn confirm_summary(batch: &Batch) -> String {
    let formatted: Vec<String> = batch
        .recipients
        .iter()
        .map(|rcp| format!("\"{}\" to {} ({})", rcp.message, rcp.label, rcp.address))
        .collect();

    formatted.join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rcp(address: &str, label: &str, message: &str) -> Recipient {
        Recipient::new(address, label, message)
    }

    #[test]
    fn collects_all_valid_entries_in_order() {
        let batch = collect_batch([
            Some(rcp("a@example.org", "A", "one")),
            Some(rcp("b@example.org", "B", "two")),
        ])
        .expect("batch expected");

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.recipients()[0].address, "a@example.org");
        assert_eq!(batch.recipients()[1].address, "b@example.org");
    }

    #[test]
    fn any_failed_entry_discards_the_batch() {
        let batch = collect_batch([Some(rcp("a@example.org", "A", "one")), None]);

        assert!(batch.is_none());
    }

    #[test]
    fn empty_input_yields_no_batch() {
        assert!(collect_batch([]).is_none());
    }

    #[test]
    fn summary_preserves_order_and_joins_with_and() {
        let batch = collect_batch([
            Some(rcp("a@example.org", "Alice", "hi")),
            Some(rcp("b@example.org", "Bob", "bye")),
        ])
        .unwrap();

        assert_eq!(
            confirm_summary(&batch),
            "\"hi\" to Alice (a@example.org) and \"bye\" to Bob (b@example.org)"
        );
    }

    #[test]
    fn summary_keeps_empty_labels_as_is() {
        let batch = collect_batch([Some(rcp("a@example.org", "", "hi"))]).unwrap();

        assert_eq!(confirm_summary(&batch), "\"hi\" to  (a@example.org)");
    }
}
