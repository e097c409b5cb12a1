//! Planner window shell. Holds the most recent page from the backend and the
//! raw form inputs; everything else lives behind the backend worker.

use std::time::Duration;

use client_core::{view::SELECTED_ANCHOR, NewPartyForm, Node, Trigger};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::{command_for_trigger, dispatch_backend_command},
};
use crate::ui::widgets::show_node;

pub struct PlannerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    tree: Option<Node>,
    form: NewPartyForm,
    form_error: Option<String>,
    status: String,
    scroll_to_detail: bool,
}

impl PlannerApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            tree: None,
            form: NewPartyForm::default(),
            form_error: None,
            status: "Loading parties...".to_string(),
            scroll_to_detail: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Rendered(page) => {
                    self.tree = Some(page.tree());
                }
                UiEvent::PartyCreated => {
                    self.form.clear();
                    self.form_error = None;
                }
                UiEvent::StartupFailed(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
            }
        }
    }

    fn handle_trigger(&mut self, trigger: Trigger) {
        if matches!(trigger, Trigger::SelectParty(_)) {
            self.scroll_to_detail = true;
        }
        match command_for_trigger(trigger, &self.form) {
            Ok(cmd) => {
                if matches!(cmd, BackendCommand::CreateParty { .. }) {
                    self.form_error = None;
                }
                dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
            }
            Err(err) => {
                tracing::debug!(error = %err, "new party form incomplete");
                self.form_error = Some(err.to_string());
            }
        }
    }

    fn show_layout(&mut self, ctx: &egui::Context, clicked: &mut Vec<Trigger>) {
        let Some(tree) = self.tree.take() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| ui.spinner());
            });
            return;
        };

        let (detail, rest): (Vec<&Node>, Vec<&Node>) = tree.children().iter().partition(
            |node| matches!(node, Node::Section { anchor: Some(anchor), .. } if *anchor == SELECTED_ANCHOR),
        );
        let (title, main): (Vec<&Node>, Vec<&Node>) = rest
            .into_iter()
            .partition(|node| matches!(node, Node::Heading { level: 1, .. }));

        egui::TopBottomPanel::top("planner_title").show(ctx, |ui| {
            for node in &title {
                show_node(ui, node, &mut self.form, clicked);
            }
        });

        egui::TopBottomPanel::bottom("planner_status").show(ctx, |ui| {
            ui.label(egui::RichText::new(&self.status).weak());
        });

        egui::SidePanel::left("planner_main")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for node in &main {
                        show_node(ui, node, &mut self.form, clicked);
                    }
                    if let Some(err) = &self.form_error {
                        ui.colored_label(ui.visuals().error_fg_color, err);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if self.scroll_to_detail {
                    ui.scroll_to_cursor(Some(egui::Align::TOP));
                    self.scroll_to_detail = false;
                }
                for node in &detail {
                    show_node(ui, node, &mut self.form, clicked);
                }
            });
        });

        self.tree = Some(tree);
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut clicked = Vec::new();
        self.show_layout(ctx, &mut clicked);
        for trigger in clicked {
            self.handle_trigger(trigger);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
