//! Application state container. Collections are replaced wholesale on every
//! refetch; only the named update operations below mutate it.

use shared::domain::{Guest, Party, PartyId, Rsvp};

/// Identifies one selection fetch. Only the most recently issued token may
/// resolve the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionToken(u64);

#[derive(Debug, Clone, Default)]
pub struct AppState {
    parties: Vec<Party>,
    guests: Vec<Guest>,
    rsvps: Vec<Rsvp>,
    selected_party: Option<Party>,
    latest_selection: u64,
}

impl AppState {
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn rsvps(&self) -> &[Rsvp] {
        &self.rsvps
    }

    pub fn selected_party(&self) -> Option<&Party> {
        self.selected_party.as_ref()
    }

    pub fn is_selected(&self, id: PartyId) -> bool {
        self.selected_party.as_ref().is_some_and(|p| p.id == id)
    }

    /// Guests holding an RSVP for `party_id`, in guest-list order.
    pub fn guests_attending(&self, party_id: PartyId) -> impl Iterator<Item = &Guest> + '_ {
        self.guests.iter().filter(move |guest| {
            self.rsvps
                .iter()
                .any(|rsvp| rsvp.guest_id == guest.id && rsvp.event_id == party_id)
        })
    }

    pub fn replace_parties(&mut self, parties: Vec<Party>) {
        self.parties = parties;
    }

    pub fn replace_guests(&mut self, guests: Vec<Guest>) {
        self.guests = guests;
    }

    pub fn replace_rsvps(&mut self, rsvps: Vec<Rsvp>) {
        self.rsvps = rsvps;
    }

    pub fn begin_selection(&mut self) -> SelectionToken {
        self.latest_selection += 1;
        SelectionToken(self.latest_selection)
    }

    /// Returns `false` and leaves the selection untouched when a newer
    /// selection was started (or the selection was cleared) after `token`.
    pub fn resolve_selection(&mut self, token: SelectionToken, party: Party) -> bool {
        if token.0 != self.latest_selection {
            return false;
        }
        self.selected_party = Some(party);
        true
    }

    /// Clears the selection and invalidates any selection still in flight.
    pub fn clear_selection(&mut self) {
        self.selected_party = None;
        self.latest_selection += 1;
    }
}
