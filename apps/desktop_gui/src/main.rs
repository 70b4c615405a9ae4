mod backend_bridge;
mod config;
mod controller;
mod media;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{CliArgs, StartupConfig};
use crate::controller::events::UiEvent;
use crate::ui::DirectoryApp;

const APP_TITLE: &str = "Practitioner Directory";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let startup = StartupConfig::load(&args).context("failed to resolve startup configuration")?;
    tracing::info!(
        dataset_url = %startup.dataset_url,
        photos = startup.photos_enabled,
        "starting practitioner directory"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, startup.dataset_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size(startup.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let photos_enabled = startup.photos_enabled;
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DirectoryApp::bootstrap(cmd_tx, ui_rx, photos_enabled)))),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))?;

    if worker.join().is_err() {
        tracing::warn!("backend worker panicked during shutdown");
    }
    Ok(())
}
