mod app;
mod logic;
mod models;
mod mvu;
mod service;
mod ui;

use std::path::PathBuf;

use crate::mvu::ComposeMode;

fn main() -> eframe::Result<()> {
    let mut mode = ComposeMode::Encrypted;
    let mut outbox = PathBuf::from("outbox");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--anonymous" => mode = ComposeMode::Anonymous,
            "--outbox" => {
                if let Some(dir) = args.next() {
                    outbox = PathBuf::from(dir);
                }
            }
            _ => {}
        }
    }

    app::run(mode, outbox)
}
