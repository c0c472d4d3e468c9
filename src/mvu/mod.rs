// SPDX-License-Identifier: MIT

//! Root Model-View-Update kernel wiring the send form, the submission state
//! machine, and the message service commands.

use crate::logic::batch::{Batch, collect_batch, confirm_summary};
use crate::models::recipient::Recipient;
use crate::service::{MessageService, SendOutcome};
use crate::ui::components::address_book::{
    self, AddressBookCommand, AddressBookModel, AddressBookMsg, PickTarget,
};
use crate::ui::components::entries::{self, EntriesModel, EntriesMsg};

/// Whether the composer collects a sender address.
///
/// Fixed at construction; collaborators read it to decide whether to show
/// the sender field at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposeMode {
    /// Messages are sent from one of the user's own addresses.
    Encrypted,
    /// No sender address is collected or passed to the service.
    Anonymous,
}

/// One submission attempt as an explicit state machine.
///
/// Anything other than `Idle` means a submission is in flight and external
/// prefill must not touch the entries. Every confirmation and delivery path
/// transitions back to `Idle` through a match arm, so no exit can leave the
/// guard engaged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    /// Waiting for the user to confirm the summarized batch.
    Confirming { batch: Batch, summary: String },
    /// The service call is running on a worker.
    Sending,
}

/// Top-level application state.
pub struct AppModel {
    mode: ComposeMode,
    /// Sender address buffer; only rendered and forwarded in encrypted mode.
    pub from_address: String,
    /// The recipient entry collection.
    pub entries: EntriesModel,
    /// Contact picker state.
    pub address_book: AddressBookModel,
    /// Current submission attempt.
    pub submit: SubmitState,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in a modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(mode: ComposeMode) -> Self {
        Self {
            mode,
            from_address: String::new(),
            entries: EntriesModel::default(),
            address_book: AddressBookModel::default(),
            submit: SubmitState::default(),
            status: None,
            error: None,
            pending_commands: 0,
        }
    }

    /// Read-only mode accessor for collaborators.
    pub fn mode(&self) -> ComposeMode {
        self.mode
    }
}

/// Application messages routed through the update function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    FromAddressChanged(String),
    Entries(EntriesMsg),
    AddressBook(AddressBookMsg),
    /// External prefill (address-book pick or host integration).
    PrefillRecipient(Recipient),
    SendRequested,
    ConfirmAccepted,
    ConfirmDeclined,
    DeliveryFinished(SendOutcome),
    DismissError,
}

/// Commands represent side effects executed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    PickContactsFile,
    DeliverBatch {
        recipients: Vec<Recipient>,
        from: Option<String>,
    },
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::FromAddressChanged(text) => model.from_address = text,
        Msg::DismissError => model.error = None,
        Msg::Entries(m) => {
            // The collection is frozen while a submission is in flight, for
            // the same reason prefill is: a failure outcome must land on the
            // exact entries the user confirmed.
            if !matches!(model.submit, SubmitState::Idle) {
                return;
            }
            if let Some(event) = entries::update(&mut model.entries, m) {
                surface_event(model, event.message, event.is_error);
            }
        }
        Msg::AddressBook(m) => {
            let mut book_cmds = Vec::new();
            if let Some(event) = address_book::update(&mut model.address_book, m, &mut book_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in book_cmds {
                match c {
                    AddressBookCommand::PickContactsFile => cmds.push(Command::PickContactsFile),
                }
            }

            if let Some((target, contact)) = model.address_book.take_selection() {
                match target {
                    PickTarget::Sender => model.from_address = contact.address,
                    PickTarget::Recipient => {
                        let candidate =
                            Recipient::new(contact.address, contact.label, String::new());
                        apply_prefill(model, &candidate);
                    }
                }
            }
        }
        Msg::PrefillRecipient(rcp) => apply_prefill(model, &rcp),
        Msg::SendRequested => {
            if !matches!(model.submit, SubmitState::Idle) {
                return;
            }

            // All-or-nothing: any failing entry discards the attempt without
            // a prompt or user-visible error; the entry UI already shows the
            // inline feedback.
            let results = model.entries.entries().iter().map(|e| e.validate());
            let Some(batch) = collect_batch(results) else {
                return;
            };

            let summary = confirm_summary(&batch);
            model.submit = SubmitState::Confirming { batch, summary };
        }
        Msg::ConfirmAccepted => match std::mem::take(&mut model.submit) {
            SubmitState::Confirming { batch, .. } => {
                let from = match model.mode {
                    ComposeMode::Encrypted => Some(model.from_address.trim().to_string()),
                    ComposeMode::Anonymous => None,
                };
                model.submit = SubmitState::Sending;
                cmds.push(Command::DeliverBatch {
                    recipients: batch.into_recipients(),
                    from,
                });
            }
            // A stray accept outside confirmation must not disturb the guard.
            other => model.submit = other,
        },
        Msg::ConfirmDeclined => {
            if matches!(model.submit, SubmitState::Confirming { .. }) {
                model.submit = SubmitState::Idle;
            }
        }
        Msg::DeliveryFinished(outcome) => {
            // Guard released before anything else, on every branch below.
            model.submit = SubmitState::Idle;

            match outcome {
                SendOutcome::Ok => {
                    model.entries.clear();
                    surface_event(model, "Messages handed to the outbox.".to_string(), false);
                }
                SendOutcome::InvalidAddress => surface_event(
                    model,
                    "The recipient address is not valid, please recheck.".to_string(),
                    true,
                ),
                SendOutcome::InvalidMessage => {
                    surface_event(model, "The message can't be empty.".to_string(), true)
                }
                SendOutcome::DuplicateAddress => surface_event(
                    model,
                    "Duplicate address found, can only send to each address once per send operation."
                        .to_string(),
                    true,
                ),
                SendOutcome::CreationFailed => {
                    surface_event(model, "Error: Message creation failed.".to_string(), true)
                }
                SendOutcome::CommitFailed => {
                    surface_event(model, "Error: The message was rejected.".to_string(), true)
                }
                // User aborted inside the transport, nothing to report.
                SendOutcome::Aborted => {}
            }
        }
    }
}

/// Execute a command on a worker and return the resulting message.
pub fn run_command(cmd: Command, service: &dyn MessageService) -> Msg {
    match cmd {
        Command::PickContactsFile => {
            let file = rfd::FileDialog::new()
                .set_title("Select contacts JSON")
                .add_filter("JSON", &["json"])
                .pick_file();

            match file {
                Some(path) => match std::fs::read_to_string(&path) {
                    Ok(content) => match crate::models::address_book::parse_contacts(&content) {
                        Ok(contacts) => Msg::AddressBook(AddressBookMsg::ImportLoaded {
                            contacts,
                            source: path,
                        }),
                        Err(err) => Msg::AddressBook(AddressBookMsg::ImportFailed(err.to_string())),
                    },
                    Err(err) => Msg::AddressBook(AddressBookMsg::ImportFailed(format!(
                        "Failed to read contacts file: {err}"
                    ))),
                },
                None => Msg::AddressBook(AddressBookMsg::ImportCancelled),
            }
        }
        Command::DeliverBatch { recipients, from } => {
            Msg::DeliveryFinished(service.send_messages(&recipients, from.as_deref()))
        }
    }
}

/// External prefill entry point, guarded against in-flight submissions.
fn apply_prefill(model: &mut AppModel, rcp: &Recipient) {
    if !matches!(model.submit, SubmitState::Idle) {
        return;
    }
    model.entries.prefill(rcp);
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
