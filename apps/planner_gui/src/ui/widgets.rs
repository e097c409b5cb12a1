//! Draws display-tree nodes with egui and collects the triggers clicked this
//! frame.

use client_core::{
    view::{InputKind, ListEntry},
    FormField, NewPartyForm, Node, Trigger,
};
use eframe::egui;

pub fn show_node(
    ui: &mut egui::Ui,
    node: &Node,
    form: &mut NewPartyForm,
    clicked: &mut Vec<Trigger>,
) {
    match node {
        Node::Heading { level, text } => {
            let rich = egui::RichText::new(text).strong();
            let rich = match level {
                1 => rich.size(24.0),
                2 => rich.size(19.0),
                _ => rich.size(16.0),
            };
            ui.label(rich);
        }
        Node::Paragraph(text) => {
            ui.label(text);
        }
        Node::Address(text) => {
            ui.label(egui::RichText::new(text).italics());
        }
        Node::Time { datetime, text } => {
            ui.label(text).on_hover_text(datetime);
        }
        Node::List { entries, .. } => show_list(ui, entries, clicked),
        Node::Input { field, required } => show_input(ui, *field, *required, form),
        Node::Button { label, trigger } => {
            if ui.button(label).clicked() {
                clicked.push(*trigger);
            }
        }
        Node::Section { children, .. } | Node::Form { children } => {
            ui.vertical(|ui| {
                for child in children {
                    show_node(ui, child, form, clicked);
                }
            });
            ui.add_space(8.0);
        }
    }
}

fn show_list(ui: &mut egui::Ui, entries: &[ListEntry], clicked: &mut Vec<Trigger>) {
    for entry in entries {
        match entry.trigger {
            Some(trigger) => {
                let response = ui.selectable_label(entry.selected, &entry.label);
                if response.clicked() {
                    clicked.push(trigger);
                }
            }
            None => {
                ui.label(format!("• {}", entry.label));
            }
        }
    }
}

fn show_input(ui: &mut egui::Ui, field: FormField, required: bool, form: &mut NewPartyForm) {
    let label = if required {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };
    ui.label(egui::RichText::new(label).strong());

    let value = form.field_mut(field);
    let edit = match (field, field.kind()) {
        (FormField::Description, _) => egui::TextEdit::multiline(value).desired_rows(3),
        (_, InputKind::Date) => egui::TextEdit::singleline(value).hint_text("YYYY-MM-DD"),
        (_, InputKind::Text) => egui::TextEdit::singleline(value),
    };
    ui.add(edit.desired_width(f32::INFINITY));
}
