// SPDX-License-Identifier: MIT

//! Message service contract the submission pipeline delegates to.

pub mod spool;

use crate::models::recipient::Recipient;

/// Final word from the transport for one submission attempt.
///
/// Closed set: consumers match exhaustively, so growing this enum forces
/// every call site to decide what the new outcome means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Ok,
    InvalidAddress,
    InvalidMessage,
    DuplicateAddress,
    CreationFailed,
    CommitFailed,
    /// The user cancelled inside the transport (e.g. an unlock prompt).
    /// Not an error; produces no feedback.
    Aborted,
}

/// The transport a batch is handed to once the user has confirmed.
///
/// The call is synchronous and blocking from the pipeline's point of view;
/// whatever it returns is final for that attempt. Duplicate-address
/// detection belongs to the service, not the caller.
pub trait MessageService: Send + Sync {
    /// Deliver `recipients` in order. `from` is the sender address and is
    /// only present when the composer runs in encrypted mode.
    fn send_messages(&self, recipients: &[Recipient], from: Option<&str>) -> SendOutcome;
}
