//! Events flowing from the backend worker to the UI thread.

use client_core::Page;

pub enum UiEvent {
    Info(String),
    /// A freshly rebuilt page; replaces whatever is on screen.
    Rendered(Box<Page>),
    /// The last create request succeeded, so the form can be cleared.
    PartyCreated,
    StartupFailed(String),
}
