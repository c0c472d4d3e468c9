// SPDX-License-Identifier: MIT

//! Ordered collection of recipient entries backing the send form.
//!
//! Owns the add/remove/clear lifecycle and the invariant that the form
//! always shows at least one entry. Remove-eligibility and the linear
//! focus order are recomputed whenever the collection changes.

use eframe::egui;

use crate::models::recipient::Recipient;
use crate::ui::components::entry::{self, EntryId, EntryModel, EntryMsg};

/// One stop in the form's linear keyboard navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Address(EntryId),
    Label(EntryId),
    Message(EntryId),
    AddButton,
    SendButton,
}

/// MVU state for the entry list. Never empty after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntriesModel {
    entries: Vec<EntryModel>,
    next_id: u64,
    focus: Option<EntryId>,
}

impl Default for EntriesModel {
    fn default() -> Self {
        let mut model = Self {
            entries: Vec::new(),
            next_id: 0,
            focus: None,
        };
        model.add_entry();
        model
    }
}

/// Messages emitted by the entries view and the surrounding form controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntriesMsg {
    Add,
    Remove(EntryId),
    Clear,
    Entry(EntryId, EntryMsg),
}

/// User-facing feedback surfaced to the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntriesEvent {
    pub message: String,
    pub is_error: bool,
}

impl EntriesModel {
    /// Append a fresh empty entry and focus it. Always succeeds.
    pub fn add_entry(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(EntryModel::new(id));
        self.refresh_remove_enabled();
        self.focus = Some(id);
        id
    }

    /// Remove the referenced entry. A stale id is a no-op, and so is any
    /// removal that would leave the form without an entry; callers wanting
    /// an empty form use [`clear`](Self::clear) instead.
    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }

        let Some(pos) = self.entries.iter().position(|e| e.id() == id) else {
            return false;
        };

        self.entries.remove(pos);
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.refresh_remove_enabled();
        true
    }

    /// Drop every entry and re-add exactly one fresh one. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.add_entry();
    }

    /// Read-only snapshot in insertion order.
    pub fn entries(&self) -> &[EntryModel] {
        &self.entries
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut EntryModel> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    /// Populate a slot with an externally supplied recipient: reuse the
    /// single entry while it is still untouched, otherwise append. Existing
    /// entries are never removed or reordered by this path.
    pub fn prefill(&mut self, rcp: &Recipient) {
        let reuse_first = self.entries.len() == 1 && self.entries[0].is_clear();

        let id = if reuse_first {
            self.entries[0].id()
        } else {
            self.add_entry()
        };

        if let Some(entry) = self.entry_mut(id) {
            entry.set_value(rcp);
        }
        self.focus = Some(id);
    }

    /// Linear keyboard navigation order: every entry's fields in entry
    /// order, then the add and send controls.
    pub fn tab_chain(&self) -> Vec<FocusTarget> {
        let mut chain = Vec::with_capacity(self.entries.len() * 3 + 2);
        for entry in &self.entries {
            chain.push(FocusTarget::Address(entry.id()));
            chain.push(FocusTarget::Label(entry.id()));
            chain.push(FocusTarget::Message(entry.id()));
        }
        chain.push(FocusTarget::AddButton);
        chain.push(FocusTarget::SendButton);
        chain
    }

    /// Entry that should grab keyboard focus this frame, if any.
    pub fn take_focus_request(&mut self) -> Option<EntryId> {
        self.focus.take()
    }

    // Remove buttons light up as soon as there is more than one entry.
    fn refresh_remove_enabled(&mut self) {
        let enabled = self.entries.len() > 1;
        for entry in &mut self.entries {
            entry.set_remove_enabled(enabled);
        }
    }
}

/// Apply a message to the collection. Returns a feedback event when relevant.
pub fn update(model: &mut EntriesModel, msg: EntriesMsg) -> Option<EntriesEvent> {
    match msg {
        EntriesMsg::Add => {
            model.add_entry();
            None
        }
        EntriesMsg::Remove(id) | EntriesMsg::Entry(id, EntryMsg::RemoveRequested) => {
            if model.remove_entry(id) {
                Some(EntriesEvent {
                    message: "Recipient entry removed".to_string(),
                    is_error: false,
                })
            } else {
                None
            }
        }
        EntriesMsg::Clear => {
            model.clear();
            Some(EntriesEvent {
                message: "Form cleared".to_string(),
                is_error: false,
            })
        }
        EntriesMsg::Entry(id, entry_msg) => {
            if let Some(entry) = model.entry_mut(id) {
                entry::update(entry, entry_msg);
            }
            None
        }
    }
}

/// Render the entry list in order, forwarding per-entry messages.
pub fn view(
    ui: &mut egui::Ui,
    model: &EntriesModel,
    focus: Option<EntryId>,
) -> Vec<EntriesMsg> {
    let mut msgs = Vec::new();

    for entry in model.entries() {
        let entry_msgs = entry::view(ui, entry, focus == Some(entry.id()));
        msgs.extend(
            entry_msgs
                .into_iter()
                .map(|m| EntriesMsg::Entry(entry.id(), m)),
        );
        ui.add_space(8.0);
    }

    msgs
}
