// SPDX-License-Identifier: MIT

//! Contact records for the address lookup collaborator.
//! Parsing is kept pure so it can be reused by UI and tests.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::recipient::address_is_valid;

/// One saved contact the user can pick instead of typing an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub label: String,
    pub address: String,
}

/// Parse a contacts JSON file: an array of `{ "label": ..., "address": ... }`.
///
/// Contacts with a malformed address are dropped rather than failing the
/// whole import; an import that yields no usable contact is an error so the
/// user gets feedback instead of a silently empty picker.
pub fn parse_contacts(json: &str) -> Result<Vec<Contact>> {
    let raw: Vec<Contact> =
        serde_json::from_str(json).context("Contacts file is not a JSON array of contacts")?;

    let total = raw.len();
    let contacts: Vec<Contact> = raw
        .into_iter()
        .filter(|c| address_is_valid(&c.address))
        .collect();

    if contacts.is_empty() {
        bail!("No contact with a valid address found ({total} entries read)");
    }

    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_contacts() {
        let json = r#"[
            {"label": "Bob", "address": "bob@example.org"},
            {"label": "Alice", "address": "alice@example.org"}
        ]"#;

        let contacts = parse_contacts(json).unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].label, "Bob");
        assert_eq!(contacts[1].address, "alice@example.org");
    }

    #[test]
    fn drops_contacts_with_bad_addresses() {
        let json = r#"[
            {"label": "Bob", "address": "bob@example.org"},
            {"label": "Broken", "address": "not-an-address"}
        ]"#;

        let contacts = parse_contacts(json).unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].label, "Bob");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_contacts("{\"label\": \"not an array\"}").is_err());
    }

    #[test]
    fn rejects_import_without_usable_contacts() {
        let json = r#"[{"label": "Broken", "address": "nope"}]"#;

        let err = parse_contacts(json).unwrap_err();

        assert!(err.to_string().contains("No contact"));
    }
}
