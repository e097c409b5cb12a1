mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, render::APP_TITLE};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PlannerApp;

/// Desktop window for browsing and managing parties.
#[derive(Parser, Debug)]
struct StartupConfig {
    /// Event service base address; overrides planner.toml and the environment.
    #[arg(long)]
    base_url: Option<String>,
    /// Cohort path segment appended to the base address.
    #[arg(long)]
    cohort: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let startup = StartupConfig::parse();

    let mut settings = load_settings();
    if let Some(base_url) = startup.base_url {
        settings.base_url = base_url;
    }
    if let Some(cohort) = startup.cohort {
        settings.cohort = cohort;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);
    if cmd_tx.try_send(BackendCommand::Bootstrap).is_err() {
        tracing::error!("failed to queue initial load");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1024.0, 700.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PlannerApp::new(cmd_tx, ui_rx)))),
    )
}
