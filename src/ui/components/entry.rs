// SPDX-License-Identifier: MIT

//! One editable recipient slot in the send form, MVU-shaped.

use eframe::egui;

use crate::models::recipient::{Recipient, address_is_valid, message_is_valid};

/// Stable handle for one entry. Ids are allocated monotonically by the
/// collection and never reused, so a stale id simply matches nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) u64);

/// Edit state for one recipient slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryModel {
    id: EntryId,
    address: String,
    label: String,
    message: String,
    remove_enabled: bool,
}

/// Messages emitted by a single entry view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryMsg {
    AddressChanged(String),
    LabelChanged(String),
    MessageChanged(String),
    /// Handled by the collection, which owns removal.
    RemoveRequested,
}

impl EntryModel {
    pub(crate) fn new(id: EntryId) -> Self {
        Self {
            id,
            address: String::new(),
            label: String::new(),
            message: String::new(),
            remove_enabled: false,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn remove_enabled(&self) -> bool {
        self.remove_enabled
    }

    pub(crate) fn set_remove_enabled(&mut self, enabled: bool) {
        self.remove_enabled = enabled;
    }

    /// True while the slot holds no user input at all.
    pub fn is_clear(&self) -> bool {
        self.address.trim().is_empty()
            && self.label.trim().is_empty()
            && self.message.trim().is_empty()
    }

    /// Entry-local validation: a well-formed address and a non-empty message.
    /// Returns the captured recipient only when both checks pass.
    pub fn validate(&self) -> Option<Recipient> {
        if !address_is_valid(&self.address) || !message_is_valid(&self.message) {
            return None;
        }

        Some(Recipient::new(
            self.address.trim(),
            self.label.trim(),
            self.message.clone(),
        ))
    }

    /// Overwrite the slot with an externally supplied recipient (prefill).
    pub fn set_value(&mut self, rcp: &Recipient) {
        self.address = rcp.address.clone();
        self.label = rcp.label.clone();
        self.message = rcp.message.clone();
    }
}

/// Apply a field-change message to the entry.
pub fn update(model: &mut EntryModel, msg: EntryMsg) {
    match msg {
        EntryMsg::AddressChanged(text) => model.address = text,
        EntryMsg::LabelChanged(text) => model.label = text,
        EntryMsg::MessageChanged(text) => model.message = text,
        // Removal is owned by the collection; nothing to do here.
        EntryMsg::RemoveRequested => {}
    }
}

/// Render one entry row group. `focus_address` grabs keyboard focus on the
/// address field, used right after the entry is added.
pub fn view(ui: &mut egui::Ui, model: &EntryModel, focus_address: bool) -> Vec<EntryMsg> {
    let mut msgs = Vec::new();

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.label("Send to");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let remove = egui::Button::new(
                    egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                        .color(egui::Color32::from_gray(140)),
                );
                if ui
                    .add_enabled(model.remove_enabled(), remove)
                    .on_hover_text("Remove this recipient")
                    .on_disabled_hover_text("The last recipient cannot be removed; use Clear All")
                    .clicked()
                {
                    msgs.push(EntryMsg::RemoveRequested);
                }
            });
        });

        egui::Grid::new(("entry_grid", model.id()))
            .num_columns(2)
            .spacing(egui::vec2(8.0, 6.0))
            .min_col_width(80.0)
            .show(ui, |ui| {
                ui.label("Address");
                let mut address = model.address.clone();
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut address)
                        .hint_text("e.g., bob@example.org")
                        .desired_width(f32::INFINITY),
                );
                if focus_address {
                    resp.request_focus();
                }
                if resp.changed() {
                    msgs.push(EntryMsg::AddressChanged(address));
                }
                if !model.address.trim().is_empty() && !address_is_valid(&model.address) {
                    ui.label(
                        egui::RichText::new("invalid address")
                            .small()
                            .color(egui::Color32::from_rgb(200, 80, 80)),
                    );
                }
                ui.end_row();

                ui.label("Label");
                let mut label = model.label.clone();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut label)
                            .hint_text("Optional name for this recipient")
                            .desired_width(f32::INFINITY),
                    )
                    .changed()
                {
                    msgs.push(EntryMsg::LabelChanged(label));
                }
                ui.end_row();

                ui.label("Message");
                let mut message = model.message.clone();
                if ui
                    .add(
                        egui::TextEdit::multiline(&mut message)
                            .hint_text("Message text")
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    )
                    .changed()
                {
                    msgs.push(EntryMsg::MessageChanged(message));
                }
                ui.end_row();
            });
    });

    msgs
}
