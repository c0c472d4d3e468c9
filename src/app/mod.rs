//! Application entry point wiring egui/eframe to launch the composer UI.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use egui_phosphor::Variant;

use crate::mvu::ComposeMode;
use crate::service::spool::SpoolService;
use crate::ui::ComposerApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(mode: ComposeMode, outbox: PathBuf) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 640.0])
            .with_min_inner_size([560.0, 400.0]),
        ..Default::default()
    };

    let service = Arc::new(SpoolService::new(outbox));

    eframe::run_native(
        "BatchSend",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(ComposerApp::new(mode, service)))
        }),
    )
}
