// SPDX-License-Identifier: MIT

//! Top-level egui application shell for composing a batch of messages.
//! Handles layout, form controls, and wiring to the message service.

pub mod components;

use std::sync::Arc;

use eframe::egui;

use crate::mvu::{self, AppModel, Command, ComposeMode, Msg, SubmitState};
use crate::service::MessageService;
use crate::ui::components::address_book::{self, AddressBookMsg, PickTarget};
use crate::ui::components::entries::{self, EntriesMsg};

/// Stateful egui application for composing and sending message batches.
pub struct ComposerApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl ComposerApp {
    pub fn new(mode: ComposeMode, service: Arc<dyn MessageService>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, service.as_ref());
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::new(mode),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for ComposerApp {
    // The eframe 0.34 runner invokes both the new required `ui` hook and the
    // still-supported `update` below; all rendering lives in `update`.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
        self.inbox = msgs;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(match self.model.mode() {
                    ComposeMode::Encrypted => "Send Messages",
                    ComposeMode::Anonymous => "Send Messages (anonymous)",
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_send_button(ui);
                    self.render_clear_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_confirm_modal(ctx);
        self.render_error_modal(ctx);

        let book_msgs = address_book::view(ctx, &self.model.address_book);
        self.inbox.extend(book_msgs.into_iter().map(Msg::AddressBook));

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                if matches!(self.model.mode(), ComposeMode::Encrypted) {
                    self.render_from_row(ui);
                    ui.add_space(12.0);
                }

                let focus = self.model.entries.take_focus_request();
                let entry_msgs = entries::view(ui, &self.model.entries, focus);
                self.inbox.extend(entry_msgs.into_iter().map(Msg::Entries));

                self.render_entry_controls(ui);
                ui.add_space(8.0);
            });
        });
    }
}

impl ComposerApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Sender address row, shown only in encrypted mode.
    fn render_from_row(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label("From");
                let mut from = self.model.from_address.clone();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut from)
                            .hint_text("Enter one of your own addresses")
                            .desired_width(ui.available_width() - 40.0),
                    )
                    .changed()
                {
                    self.inbox.push(Msg::FromAddressChanged(from));
                }

                if ui
                    .button(egui_phosphor::regular::ADDRESS_BOOK)
                    .on_hover_text("Pick one of your addresses")
                    .clicked()
                {
                    self.inbox
                        .push(Msg::AddressBook(AddressBookMsg::Open(PickTarget::Sender)));
                }
            });
        });
    }

    /// Add-recipient controls rendered below the entry list. Greyed out
    /// while a submission is in flight, like the send button.
    fn render_entry_controls(&mut self, ui: &mut egui::Ui) {
        let idle = matches!(self.model.submit, SubmitState::Idle);
        ui.horizontal(|ui| {
            let add = egui::Button::new(format!(
                "{} Add recipient",
                egui_phosphor::regular::PLUS
            ));
            if ui.add_enabled(idle, add).clicked() {
                self.inbox.push(Msg::Entries(EntriesMsg::Add));
            }

            let book = egui::Button::new(format!(
                "{} From address book",
                egui_phosphor::regular::ADDRESS_BOOK
            ));
            if ui.add_enabled(idle, book).clicked() {
                self.inbox
                    .push(Msg::AddressBook(AddressBookMsg::Open(PickTarget::Recipient)));
            }
        });
    }

    fn render_clear_button(&mut self, ui: &mut egui::Ui) {
        let idle = matches!(self.model.submit, SubmitState::Idle);
        let button = egui::Button::new(format!("{} Clear All", egui_phosphor::regular::BROOM));
        if ui
            .add_enabled(idle, button)
            .on_hover_text("Remove every recipient and start over")
            .on_disabled_hover_text("A submission is already in progress")
            .clicked()
        {
            self.inbox.push(Msg::Entries(EntriesMsg::Clear));
        }
    }

    fn render_send_button(&mut self, ui: &mut egui::Ui) {
        let idle = matches!(self.model.submit, SubmitState::Idle);
        let button = egui::Button::new(format!(
            "{} Send",
            egui_phosphor::regular::PAPER_PLANE_TILT
        ));

        if ui
            .add_enabled(idle, button)
            .on_disabled_hover_text("A submission is already in progress")
            .clicked()
        {
            self.inbox.push(Msg::SendRequested);
        }
    }

    /// Confirmation prompt shown while the pipeline waits for the user.
    fn render_confirm_modal(&mut self, ctx: &egui::Context) {
        if let SubmitState::Confirming { summary, .. } = &self.model.submit {
            let summary = summary.clone();
            egui::Window::new("Confirm send messages")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(format!("Are you sure you want to send {summary}?"));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Send").clicked() {
                            self.inbox.push(Msg::ConfirmAccepted);
                        }
                        if ui.button("Cancel").clicked() {
                            self.inbox.push(Msg::ConfirmDeclined);
                        }
                    });
                });
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Send Message")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status/error message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0))
                        .on_hover_text(format!(
                            "{} task(s) running in background",
                            self.model.pending_commands
                        ));
                }
            });
        }
    }
}
