//! Render orchestration: rebuilds the whole page from state on every change.

use std::fmt::Write as _;

use crate::{
    state::AppState,
    view::{self, Node, Trigger, SELECTED_ANCHOR},
};

pub const APP_TITLE: &str = "Party Planner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    PartyList,
    NewPartyForm,
    SelectedParty,
}

/// One fully built page. Each view builder's output sits in its own slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub party_list: Node,
    pub new_party_form: Node,
    pub selected_party: Node,
}

impl Page {
    pub fn slot(&self, slot: Slot) -> &Node {
        match slot {
            Slot::PartyList => &self.party_list,
            Slot::NewPartyForm => &self.new_party_form,
            Slot::SelectedParty => &self.selected_party,
        }
    }

    /// The complete layout with every slot filled in.
    pub fn tree(&self) -> Node {
        Node::Section {
            anchor: None,
            children: vec![
                Node::Heading {
                    level: 1,
                    text: APP_TITLE.to_string(),
                },
                Node::Section {
                    anchor: None,
                    children: vec![
                        Node::Heading {
                            level: 2,
                            text: "Upcoming Parties".to_string(),
                        },
                        self.party_list.clone(),
                        Node::Heading {
                            level: 3,
                            text: "Add a new party".to_string(),
                        },
                        self.new_party_form.clone(),
                    ],
                },
                Node::Section {
                    anchor: Some(SELECTED_ANCHOR),
                    children: vec![
                        Node::Heading {
                            level: 2,
                            text: "Party Details".to_string(),
                        },
                        self.selected_party.clone(),
                    ],
                },
            ],
        }
    }

    pub fn triggers(&self) -> Vec<Trigger> {
        self.tree().triggers()
    }

    /// Indented plain-text rendering, used by the command line front end.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        write_text(&self.tree(), 0, &mut out);
        out
    }
}

pub fn render(state: &AppState) -> Page {
    Page {
        party_list: view::party_list(state),
        new_party_form: view::new_party_form(),
        selected_party: view::selected_party(state),
    }
}

/// Receives every page the orchestrator builds.
pub trait RenderSink {
    fn present(&mut self, page: Page);
}

impl<F> RenderSink for F
where
    F: FnMut(Page),
{
    fn present(&mut self, page: Page) {
        self(page)
    }
}

fn write_text(node: &Node, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match node {
        Node::Heading { level, text } => {
            let _ = writeln!(out, "{pad}{} {text}", "#".repeat(usize::from(*level)));
        }
        Node::Paragraph(text) => {
            let _ = writeln!(out, "{pad}{text}");
        }
        Node::Address(text) => {
            let _ = writeln!(out, "{pad}@ {text}");
        }
        Node::Time { text, .. } => {
            let _ = writeln!(out, "{pad}{text}");
        }
        Node::List { entries, .. } => {
            if entries.is_empty() {
                let _ = writeln!(out, "{pad}(none)");
            }
            for entry in entries {
                let marker = if entry.selected { '>' } else { '-' };
                let id = match entry.trigger {
                    Some(Trigger::SelectParty(id)) => format!(" [{id}]"),
                    _ => String::new(),
                };
                let _ = writeln!(out, "{pad}{marker} {}{id}", entry.label);
            }
        }
        Node::Input { field, required } => {
            let req = if *required { " (required)" } else { "" };
            let _ = writeln!(out, "{pad}[{}]{req}", field.label());
        }
        Node::Button { label, .. } => {
            let _ = writeln!(out, "{pad}<{label}>");
        }
        Node::Section { children, .. } | Node::Form { children } => {
            let child_depth = if depth == 0 && matches!(node, Node::Section { .. }) {
                0
            } else {
                depth + 1
            };
            for child in children {
                write_text(child, child_depth, out);
            }
        }
    }
}
