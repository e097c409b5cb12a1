//! View builders: pure functions from [`AppState`] to a display tree.
//!
//! Nothing here performs I/O. Interactive elements carry a [`Trigger`] that
//! the front end maps back to a handler after drawing the tree.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use shared::domain::{Party, PartyDraft, PartyId};
use thiserror::Error;

use crate::state::AppState;

pub const SELECTED_ANCHOR: &str = "selected";
pub const NO_SELECTION_PROMPT: &str = "Please select a party to learn more.";
pub const PARTY_LIST_CLASS: &str = "parties";
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    SelectParty(PartyId),
    DeleteParty(PartyId),
    SubmitNewParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Description,
    Date,
    Location,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Description,
        FormField::Date,
        FormField::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Description => "Description",
            FormField::Date => "Date",
            FormField::Location => "Location",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            FormField::Date => InputKind::Date,
            _ => InputKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    pub selected: bool,
    pub href: Option<&'static str>,
    pub trigger: Option<Trigger>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph(String),
    Address(String),
    Time {
        datetime: String,
        text: String,
    },
    List {
        class: Option<&'static str>,
        entries: Vec<ListEntry>,
    },
    Input {
        field: FormField,
        required: bool,
    },
    Button {
        label: String,
        trigger: Trigger,
    },
    Section {
        anchor: Option<&'static str>,
        children: Vec<Node>,
    },
    Form {
        children: Vec<Node>,
    },
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Section { children, .. } | Node::Form { children } => children.as_slice(),
            _ => &[],
        }
    }

    /// Every trigger reachable from this node, in document order.
    pub fn triggers(&self) -> Vec<Trigger> {
        let mut out = Vec::new();
        self.collect_triggers(&mut out);
        out
    }

    fn collect_triggers(&self, out: &mut Vec<Trigger>) {
        match self {
            Node::List { entries, .. } => out.extend(entries.iter().filter_map(|e| e.trigger)),
            Node::Button { trigger, .. } => out.push(*trigger),
            _ => {}
        }
        for child in self.children() {
            child.collect_triggers(out);
        }
    }

    /// First list found in a depth-first walk.
    pub fn find_list(&self) -> Option<&[ListEntry]> {
        if let Node::List { entries, .. } = self {
            return Some(entries.as_slice());
        }
        self.children().iter().find_map(Node::find_list)
    }
}

pub fn party_list(state: &AppState) -> Node {
    let entries = state
        .parties()
        .iter()
        .map(|party| ListEntry {
            label: party.name.clone(),
            selected: state.is_selected(party.id),
            href: Some(SELECTED_ANCHOR),
            trigger: Some(Trigger::SelectParty(party.id)),
        })
        .collect();

    Node::List {
        class: Some(PARTY_LIST_CLASS),
        entries,
    }
}

/// Guests with an RSVP for `party`, one plain entry each.
pub fn guest_roster(state: &AppState, party: &Party) -> Node {
    let entries = state
        .guests_attending(party.id)
        .map(|guest| ListEntry {
            label: guest.name.clone(),
            selected: false,
            href: None,
            trigger: None,
        })
        .collect();

    Node::List {
        class: None,
        entries,
    }
}

pub fn selected_party(state: &AppState) -> Node {
    let Some(party) = state.selected_party() else {
        return Node::Paragraph(NO_SELECTION_PROMPT.to_string());
    };

    Node::Section {
        anchor: None,
        children: vec![
            Node::Heading {
                level: 3,
                text: format!("{} #{}", party.name, party.id),
            },
            Node::Time {
                datetime: party.date.to_rfc3339_opts(SecondsFormat::Millis, true),
                text: display_date(&party.date),
            },
            Node::Address(party.location.clone()),
            Node::Paragraph(party.description.clone()),
            guest_roster(state, party),
            Node::Button {
                label: "Delete party".to_string(),
                trigger: Trigger::DeleteParty(party.id),
            },
        ],
    }
}

pub fn new_party_form() -> Node {
    let mut children: Vec<Node> = FormField::ALL
        .into_iter()
        .map(|field| Node::Input {
            field,
            required: true,
        })
        .collect();
    children.push(Node::Button {
        label: "Add party".to_string(),
        trigger: Trigger::SubmitNewParty,
    });
    Node::Form { children }
}

fn display_date(date: &DateTime<Utc>) -> String {
    date.format("%A, %B %-d, %Y at %H:%M UTC").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    MissingField(FormField),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Raw contents of the new-party form's inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPartyForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl NewPartyForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Date => &self.date,
            FormField::Location => &self.location,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Date => &mut self.date,
            FormField::Location => &mut self.location,
        }
    }

    pub fn to_draft(&self) -> Result<PartyDraft, FormError> {
        for field in FormField::ALL {
            if self.field(field).trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }

        Ok(PartyDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            date: normalize_date(&self.date)?,
            location: self.location.trim().to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Expands a date-only `YYYY-MM-DD` input to midnight UTC of that day.
pub fn normalize_date(raw: &str) -> Result<DateTime<Utc>, FormError> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT)
        .map_err(|_| FormError::InvalidDate(raw.to_string()))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
