//! Backend worker: a dedicated thread feeding commands into a tokio runtime.
//! Each command runs as its own task, so a request that never returns holds
//! up only the handler that issued it.

use std::{sync::Arc, thread};

use client_core::{HttpPartyGateway, Outcome, Page, Planner, RenderSink, Settings};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Forwards every rendered page to the UI thread.
struct ChannelSink {
    ui_tx: Sender<UiEvent>,
}

impl RenderSink for ChannelSink {
    fn present(&mut self, page: Page) {
        match self.ui_tx.try_send(UiEvent::Rendered(Box::new(page))) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; dropping rendered page");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed; dropping rendered page");
            }
        }
    }
}

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::StartupFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let gateway = match HttpPartyGateway::from_settings(&settings) {
            Ok(gateway) => gateway,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::StartupFailed(format!(
                    "invalid event service address '{}' / '{}': {err}",
                    settings.base_url, settings.cohort
                )));
                tracing::error!(base_url = %settings.base_url, cohort = %settings.cohort, "invalid event service address: {err}");
                return;
            }
        };
        tracing::info!(api_root = gateway.api_root(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!("Connected to {}", gateway.api_root())));

        let planner = Arc::new(Planner::new(
            gateway,
            ChannelSink {
                ui_tx: ui_tx.clone(),
            },
        ));

        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "spawning backend command");
            let planner = Arc::clone(&planner);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                match cmd {
                    BackendCommand::Bootstrap => planner.bootstrap().await,
                    BackendCommand::SelectParty { party_id } => {
                        planner.select_party(party_id).await;
                    }
                    BackendCommand::CreateParty { draft } => {
                        if planner.submit_new_party(draft).await == Outcome::Applied {
                            let _ = ui_tx.try_send(UiEvent::PartyCreated);
                        }
                    }
                    BackendCommand::DeleteParty { party_id } => {
                        planner.delete_party(party_id).await;
                    }
                }
            });
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}
