// SPDX-License-Identifier: MIT

//! Contact picker modal for the address lookup collaborator.
//!
//! Contacts are imported from a user-picked JSON file; selecting one hands
//! exactly one address back to the pipeline, either for the sender field or
//! as a new recipient.

use std::path::PathBuf;

use eframe::egui;

use crate::models::address_book::Contact;

/// What the picked address will be used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    /// Fill the sender address field (encrypted mode only).
    Sender,
    /// Prefill a recipient entry.
    Recipient,
}

/// MVU state for the contact picker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressBookModel {
    contacts: Vec<Contact>,
    source: Option<PathBuf>,
    open_for: Option<PickTarget>,
    selected: Option<(PickTarget, Contact)>,
}

/// Messages emitted by the picker view and the import command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressBookMsg {
    Open(PickTarget),
    Close,
    RequestImport,
    ImportLoaded { contacts: Vec<Contact>, source: PathBuf },
    ImportFailed(String),
    ImportCancelled,
    Select(usize),
}

/// Side-effectful commands run off the UI path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressBookCommand {
    PickContactsFile,
}

/// User-facing feedback for the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressBookEvent {
    pub message: String,
    pub is_error: bool,
}

impl AddressBookModel {
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn is_open(&self) -> bool {
        self.open_for.is_some()
    }

    /// Selection made since the last call, if any. Consumed by the pipeline.
    pub fn take_selection(&mut self) -> Option<(PickTarget, Contact)> {
        self.selected.take()
    }
}

/// Apply a message to the picker. Returns a feedback event when relevant.
pub fn update(
    model: &mut AddressBookModel,
    msg: AddressBookMsg,
    cmds: &mut Vec<AddressBookCommand>,
) -> Option<AddressBookEvent> {
    match msg {
        AddressBookMsg::Open(target) => {
            model.open_for = Some(target);
            None
        }
        AddressBookMsg::Close => {
            model.open_for = None;
            None
        }
        AddressBookMsg::RequestImport => {
            cmds.push(AddressBookCommand::PickContactsFile);
            None
        }
        AddressBookMsg::ImportLoaded { contacts, source } => {
            let count = contacts.len();
            model.contacts = contacts;
            model.source = Some(source);
            Some(AddressBookEvent {
                message: format!("Imported {count} contact(s)"),
                is_error: false,
            })
        }
        AddressBookMsg::ImportFailed(reason) => Some(AddressBookEvent {
            message: format!("Contact import failed: {reason}"),
            is_error: true,
        }),
        AddressBookMsg::ImportCancelled => Some(AddressBookEvent {
            message: "Contact import cancelled.".to_string(),
            is_error: false,
        }),
        AddressBookMsg::Select(index) => {
            if let (Some(target), Some(contact)) = (model.open_for, model.contacts.get(index)) {
                model.selected = Some((target, contact.clone()));
                model.open_for = None;
            }
            None
        }
    }
}

/// Show the picker modal when open.
pub fn view(ctx: &egui::Context, model: &AddressBookModel) -> Vec<AddressBookMsg> {
    let mut msgs = Vec::new();

    if !model.is_open() {
        return msgs;
    }

    egui::Window::new("Address book")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            if model.contacts.is_empty() {
                ui.label(
                    egui::RichText::new("No contacts imported yet.")
                        .italics()
                        .color(egui::Color32::from_gray(110)),
                );
            } else {
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for (i, contact) in model.contacts.iter().enumerate() {
                        let text = format!("{} <{}>", contact.label, contact.address);
                        if ui.selectable_label(false, text).clicked() {
                            msgs.push(AddressBookMsg::Select(i));
                        }
                    }
                });
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let import_label =
                    format!("{} Import contacts", egui_phosphor::regular::DOWNLOAD_SIMPLE);
                if ui.button(import_label).clicked() {
                    msgs.push(AddressBookMsg::RequestImport);
                }

                if ui.button("Cancel").clicked() {
                    msgs.push(AddressBookMsg::Close);
                }
            });

            if let Some(source) = &model.source {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("From {}", source.display()))
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            }
        });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(label: &str, address: &str) -> Contact {
        Contact {
            label: label.into(),
            address: address.into(),
        }
    }

    fn loaded_model() -> AddressBookModel {
        let mut model = AddressBookModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            AddressBookMsg::ImportLoaded {
                contacts: vec![contact("Bob", "bob@example.org")],
                source: PathBuf::from("contacts.json"),
            },
            &mut cmds,
        );
        model
    }

    #[test]
    fn import_request_enqueues_file_pick() {
        let mut model = AddressBookModel::default();
        let mut cmds = Vec::new();

        update(&mut model, AddressBookMsg::RequestImport, &mut cmds);

        assert_eq!(cmds, vec![AddressBookCommand::PickContactsFile]);
    }

    #[test]
    fn selecting_a_contact_records_target_and_closes() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();
        update(&mut model, AddressBookMsg::Open(PickTarget::Sender), &mut cmds);

        update(&mut model, AddressBookMsg::Select(0), &mut cmds);

        assert!(!model.is_open());
        let (target, picked) = model.take_selection().expect("selection expected");
        assert_eq!(target, PickTarget::Sender);
        assert_eq!(picked.address, "bob@example.org");
        assert!(model.take_selection().is_none());
    }

    #[test]
    fn select_without_open_modal_is_ignored() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();

        update(&mut model, AddressBookMsg::Select(0), &mut cmds);

        assert!(model.take_selection().is_none());
    }

    #[test]
    fn out_of_range_selection_keeps_modal_open() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();
        update(
            &mut model,
            AddressBookMsg::Open(PickTarget::Recipient),
            &mut cmds,
        );

        update(&mut model, AddressBookMsg::Select(7), &mut cmds);

        assert!(model.is_open());
        assert!(model.take_selection().is_none());
    }

    #[test]
    fn failed_import_surfaces_an_error_event() {
        let mut model = AddressBookModel::default();
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            AddressBookMsg::ImportFailed("bad json".into()),
            &mut cmds,
        )
        .expect("event expected");

        assert!(event.is_error);
        assert!(event.message.contains("bad json"));
        assert!(model.contacts().is_empty());
    }
}
