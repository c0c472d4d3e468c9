// SPDX-License-Identifier: MIT

//! Recipient domain model and entry-local validation helpers (UI-agnostic).

use email_address::EmailAddress;

/// A fully specified message recipient captured from one form entry.
///
/// Plain value type with structural equality; once collected into a batch it
/// is never mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipient {
    pub address: String,
    pub label: String,
    pub message: String,
}

impl Recipient {
    pub fn new(address: impl Into<String>, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            label: label.into(),
            message: message.into(),
        }
    }
}

/// Format check for a destination or sender address.
pub fn address_is_valid(address: &str) -> bool {
    EmailAddress::is_valid(address.trim())
}

/// A message must carry visible content; whitespace-only counts as empty.
pub fn message_is_valid(message: &str) -> bool {
    !message.trim().is_empty()
}
