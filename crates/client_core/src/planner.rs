//! Interaction handlers. Handlers may run concurrently: state and sink sit
//! behind one async mutex that is taken only to mutate and render, never
//! while a gateway call is in flight, so a stuck request stalls only its own
//! handler.

use shared::domain::{PartyDraft, PartyId};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    error::GatewayError,
    gateway::PartyGateway,
    render::{render, RenderSink},
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler ran its follow-up and state was updated.
    Applied,
    /// A newer request superseded this one; its response was dropped.
    Stale,
    /// The gateway call failed; state is unchanged.
    Failed,
    /// Nothing to do.
    Skipped,
}

struct Shared<S> {
    state: AppState,
    sink: S,
}

impl<S: RenderSink> Shared<S> {
    fn present(&mut self) {
        let page = render(&self.state);
        self.sink.present(page);
    }
}

pub struct Planner<G, S> {
    gateway: G,
    shared: Mutex<Shared<S>>,
}

impl<G: PartyGateway, S: RenderSink> Planner<G, S> {
    pub fn new(gateway: G, sink: S) -> Self {
        Self {
            gateway,
            shared: Mutex::new(Shared {
                state: AppState::default(),
                sink,
            }),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> AppState {
        self.shared.lock().await.state.clone()
    }

    /// Runs `f` against the current state and sink under the lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&AppState, &S) -> R) -> R {
        let shared = self.shared.lock().await;
        f(&shared.state, &shared.sink)
    }

    pub async fn render(&self) {
        self.shared.lock().await.present();
    }

    async fn apply(&self, update: impl FnOnce(&mut AppState)) {
        let mut shared = self.shared.lock().await;
        update(&mut shared.state);
        shared.present();
    }

    /// Parties, then RSVPs, then guests, strictly in sequence, then one
    /// final render.
    pub async fn bootstrap(&self) {
        self.refresh_parties().await;
        self.refresh_rsvps().await;
        self.refresh_guests().await;

        let mut shared = self.shared.lock().await;
        shared.present();
        info!(
            parties = shared.state.parties().len(),
            rsvps = shared.state.rsvps().len(),
            guests = shared.state.guests().len(),
            "initial load finished"
        );
    }

    pub async fn refresh_parties(&self) -> Outcome {
        match self.gateway.list_parties().await {
            Ok(parties) => {
                self.apply(|state| state.replace_parties(parties)).await;
                Outcome::Applied
            }
            Err(err) => {
                error!(error = %err, "failed to fetch parties");
                Outcome::Failed
            }
        }
    }

    pub async fn refresh_rsvps(&self) -> Outcome {
        match self.gateway.list_rsvps().await {
            Ok(rsvps) => {
                self.apply(|state| state.replace_rsvps(rsvps)).await;
                Outcome::Applied
            }
            Err(err) => {
                error!(error = %err, "failed to fetch rsvps");
                Outcome::Failed
            }
        }
    }

    pub async fn refresh_guests(&self) -> Outcome {
        match self.gateway.list_guests().await {
            Ok(guests) => {
                self.apply(|state| state.replace_guests(guests)).await;
                Outcome::Applied
            }
            Err(err) => {
                error!(error = %err, "failed to fetch guests");
                Outcome::Failed
            }
        }
    }

    pub async fn select_party(&self, id: PartyId) -> Outcome {
        let token = self.shared.lock().await.state.begin_selection();
        let party = match self.gateway.get_party(id).await {
            Ok(party) => party,
            Err(err) => {
                error!(party_id = %id, error = %err, "failed to fetch party");
                return Outcome::Failed;
            }
        };

        let mut shared = self.shared.lock().await;
        if !shared.state.resolve_selection(token, party) {
            warn!(party_id = %id, "discarding stale party selection");
            return Outcome::Stale;
        }
        shared.present();
        Outcome::Applied
    }

    /// Creates the party, then refetches the list so it shows up exactly once.
    /// An error status still counts as answered and gets the refresh.
    pub async fn submit_new_party(&self, draft: PartyDraft) -> Outcome {
        info!(name = %draft.name, date = %draft.date, "submitting new party");
        match self.gateway.create_party(&draft).await {
            Ok(()) => {}
            Err(err @ GatewayError::Status { .. }) => {
                warn!(name = %draft.name, error = %err, "create answered with error status; refreshing anyway");
            }
            Err(err) => {
                error!(name = %draft.name, error = %err, "failed to create party");
                return Outcome::Failed;
            }
        }
        self.refresh_parties().await;
        Outcome::Applied
    }

    pub async fn delete_selected_party(&self) -> Outcome {
        let selected = self
            .shared
            .lock()
            .await
            .state
            .selected_party()
            .map(|party| party.id);
        match selected {
            Some(id) => self.delete_party(id).await,
            None => Outcome::Skipped,
        }
    }

    /// Deletes the party, clears the selection and refetches the list. An
    /// error status still clears and refreshes.
    pub async fn delete_party(&self, id: PartyId) -> Outcome {
        match self.gateway.delete_party(id).await {
            Ok(()) => {}
            Err(err @ GatewayError::Status { .. }) => {
                warn!(party_id = %id, error = %err, "delete answered with error status; refreshing anyway");
            }
            Err(err) => {
                error!(party_id = %id, error = %err, "failed to delete party");
                return Outcome::Failed;
            }
        }
        self.shared.lock().await.state.clear_selection();
        if self.refresh_parties().await != Outcome::Applied {
            self.render().await;
        }
        Outcome::Applied
    }
}

#[cfg(test)]
#[path = "tests/planner_tests.rs"]
mod tests;
