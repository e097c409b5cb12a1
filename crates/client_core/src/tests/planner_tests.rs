use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::domain::{Guest, GuestId, Party, Rsvp};
use tokio::sync::Notify;

use super::*;
use crate::{
    error::GatewayError,
    render::{Page, Slot},
    view::{normalize_date, Node, NO_SELECTION_PROMPT},
};

#[derive(Default)]
struct FakeService {
    parties: Vec<Party>,
    guests: Vec<Guest>,
    rsvps: Vec<Rsvp>,
    next_id: i64,
    calls: Vec<&'static str>,
    failing: Vec<&'static str>,
    rejected: Vec<&'static str>,
}

/// Holds `get_party` for one id until released.
#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
}

/// In-memory stand-in for the event service.
struct FakeGateway {
    inner: Mutex<FakeService>,
    held: Option<(PartyId, Arc<Gate>)>,
}

impl FakeGateway {
    fn scenario() -> Self {
        let service = FakeService {
            parties: (1..=3).map(|id| party(id, &format!("Party {id}"))).collect(),
            guests: vec![guest(1, "Ada"), guest(2, "Grace")],
            rsvps: vec![Rsvp {
                guest_id: GuestId(1),
                event_id: PartyId(2),
            }],
            next_id: 4,
            ..FakeService::default()
        };
        Self {
            inner: Mutex::new(service),
            held: None,
        }
    }

    /// The service answers `call` with 404 without doing anything.
    fn reject(self, call: &'static str) -> Self {
        self.inner.lock().expect("lock").rejected.push(call);
        self
    }

    fn hold_party(mut self, id: PartyId) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        self.held = Some((id, Arc::clone(&gate)));
        (self, gate)
    }

    fn fail_on(self, call: &'static str) -> Self {
        self.inner.lock().expect("lock").failing.push(call);
        self
    }

    fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().expect("lock").calls.clone()
    }

    fn record(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, FakeService>, GatewayError> {
        let mut inner = self.inner.lock().expect("lock");
        inner.calls.push(call);
        if inner.failing.contains(&call) {
            let source = serde_json::from_str::<serde_json::Value>("{").expect_err("bad json");
            return Err(GatewayError::Decode {
                url: format!("fake://{call}"),
                source,
            });
        }
        if inner.rejected.contains(&call) {
            return Err(GatewayError::Status {
                url: format!("fake://{call}"),
                status: StatusCode::NOT_FOUND,
            });
        }
        Ok(inner)
    }
}

#[async_trait]
impl PartyGateway for FakeGateway {
    async fn list_parties(&self) -> Result<Vec<Party>, GatewayError> {
        Ok(self.record("list_parties")?.parties.clone())
    }

    async fn get_party(&self, id: PartyId) -> Result<Party, GatewayError> {
        let found = {
            let inner = self.record("get_party")?;
            inner.parties.iter().find(|p| p.id == id).cloned()
        };
        if let Some((held, gate)) = &self.held {
            if *held == id {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }
        found.ok_or_else(|| GatewayError::InvalidUrl(url::ParseError::EmptyHost))
    }

    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, GatewayError> {
        Ok(self.record("list_rsvps")?.rsvps.clone())
    }

    async fn list_guests(&self) -> Result<Vec<Guest>, GatewayError> {
        Ok(self.record("list_guests")?.guests.clone())
    }

    async fn create_party(&self, draft: &PartyDraft) -> Result<(), GatewayError> {
        let mut inner = self.record("create_party")?;
        let id = PartyId(inner.next_id);
        inner.next_id += 1;
        inner.parties.push(Party {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            date: draft.date,
            location: draft.location.clone(),
        });
        Ok(())
    }

    async fn delete_party(&self, id: PartyId) -> Result<(), GatewayError> {
        self.record("delete_party")?.parties.retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSink {
    pages: Vec<Page>,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, page: Page) {
        self.pages.push(page);
    }
}

fn party(id: i64, name: &str) -> Party {
    Party {
        id: PartyId(id),
        name: name.to_string(),
        description: "desc".to_string(),
        date: normalize_date("2024-03-01").expect("date"),
        location: "Hall".to_string(),
    }
}

fn guest(id: i64, name: &str) -> Guest {
    Guest {
        id: GuestId(id),
        name: name.to_string(),
    }
}

fn draft(name: &str) -> PartyDraft {
    PartyDraft {
        name: name.to_string(),
        description: "Fireworks".to_string(),
        date: normalize_date("2024-07-04").expect("date"),
        location: "Pier".to_string(),
    }
}

fn planner(gateway: FakeGateway) -> Planner<FakeGateway, RecordingSink> {
    Planner::new(gateway, RecordingSink::default())
}

fn roster(page: &Page) -> Vec<String> {
    page.slot(Slot::SelectedParty)
        .children()
        .iter()
        .find_map(Node::find_list)
        .map(|entries| entries.iter().map(|e| e.label.clone()).collect())
        .unwrap_or_default()
}

async fn last_page(planner: &Planner<FakeGateway, RecordingSink>) -> Page {
    planner
        .inspect(|_, sink| sink.pages.last().cloned())
        .await
        .expect("at least one render")
}

async fn render_count(planner: &Planner<FakeGateway, RecordingSink>) -> usize {
    planner.inspect(|_, sink| sink.pages.len()).await
}

async fn selected_id(planner: &Planner<FakeGateway, RecordingSink>) -> Option<PartyId> {
    planner.snapshot().await.selected_party().map(|p| p.id)
}

#[tokio::test]
async fn bootstrap_fetches_in_sequence_and_renders_each_step() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;

    assert_eq!(
        planner.gateway().calls(),
        vec!["list_parties", "list_rsvps", "list_guests"]
    );
    assert_eq!(render_count(&planner).await, 4);
    let state = planner.snapshot().await;
    assert_eq!(state.parties().len(), 3);
    assert_eq!(state.guests().len(), 2);
    assert_eq!(state.rsvps().len(), 1);
}

#[tokio::test]
async fn selecting_party_two_shows_only_guest_one() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;

    assert_eq!(planner.select_party(PartyId(2)).await, Outcome::Applied);
    assert_eq!(roster(&last_page(&planner).await), vec!["Ada".to_string()]);

    assert_eq!(planner.select_party(PartyId(1)).await, Outcome::Applied);
    assert!(roster(&last_page(&planner).await).is_empty());
    assert_eq!(selected_id(&planner).await, Some(PartyId(1)));
}

#[tokio::test]
async fn no_selection_shows_prompt() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;

    assert_eq!(
        last_page(&planner).await.slot(Slot::SelectedParty),
        &Node::Paragraph(NO_SELECTION_PROMPT.to_string())
    );
}

#[tokio::test]
async fn selection_fetches_party_individually() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;
    planner.select_party(PartyId(3)).await;

    assert_eq!(planner.gateway().calls().last(), Some(&"get_party"));
}

#[tokio::test]
async fn slow_selection_resolving_after_newer_one_is_stale() {
    let (gateway, gate) = FakeGateway::scenario().hold_party(PartyId(1));
    let planner = planner(gateway);
    planner.bootstrap().await;

    let (first, second) = tokio::join!(planner.select_party(PartyId(1)), async {
        gate.entered.notified().await;
        let outcome = planner.select_party(PartyId(2)).await;
        gate.release.notify_one();
        outcome
    });

    assert_eq!(second, Outcome::Applied);
    assert_eq!(first, Outcome::Stale);
    assert_eq!(selected_id(&planner).await, Some(PartyId(2)));
    assert_eq!(roster(&last_page(&planner).await), vec!["Ada".to_string()]);
}

#[tokio::test]
async fn stuck_selection_does_not_block_other_handlers() {
    let (gateway, gate) = FakeGateway::scenario().hold_party(PartyId(1));
    let planner = planner(gateway);
    planner.bootstrap().await;

    let (_, created) = tokio::join!(planner.select_party(PartyId(1)), async {
        gate.entered.notified().await;
        let outcome = planner.submit_new_party(draft("Fourth")).await;
        let parties = planner.snapshot().await.parties().len();
        gate.release.notify_one();
        (outcome, parties)
    });

    assert_eq!(created, (Outcome::Applied, 4));
}

#[tokio::test]
async fn deleting_selected_party_clears_selection_and_refreshes() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;
    planner.select_party(PartyId(2)).await;

    assert_eq!(planner.delete_selected_party().await, Outcome::Applied);
    assert_eq!(selected_id(&planner).await, None);
    let ids: Vec<_> = planner
        .snapshot()
        .await
        .parties()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![PartyId(1), PartyId(3)]);
    assert_eq!(
        last_page(&planner).await.slot(Slot::SelectedParty),
        &Node::Paragraph(NO_SELECTION_PROMPT.to_string())
    );
}

#[tokio::test]
async fn delete_answered_with_error_status_still_clears_and_refreshes() {
    let planner = planner(FakeGateway::scenario().reject("delete_party"));
    planner.bootstrap().await;
    planner.select_party(PartyId(2)).await;

    assert_eq!(planner.delete_selected_party().await, Outcome::Applied);
    assert_eq!(selected_id(&planner).await, None);
    assert_eq!(
        &planner.gateway().calls()[4..],
        &["delete_party", "list_parties"]
    );
    assert_eq!(
        last_page(&planner).await.slot(Slot::SelectedParty),
        &Node::Paragraph(NO_SELECTION_PROMPT.to_string())
    );
}

#[tokio::test]
async fn delete_clears_selection_even_when_refresh_fails() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;
    planner.select_party(PartyId(2)).await;
    planner.gateway().inner.lock().expect("lock").failing.push("list_parties");
    let renders_before = render_count(&planner).await;

    assert_eq!(planner.delete_selected_party().await, Outcome::Applied);
    assert_eq!(selected_id(&planner).await, None);
    assert_eq!(render_count(&planner).await, renders_before + 1);
}

#[tokio::test]
async fn unreachable_delete_keeps_selection() {
    let planner = planner(FakeGateway::scenario().fail_on("delete_party"));
    planner.bootstrap().await;
    planner.select_party(PartyId(2)).await;

    assert_eq!(planner.delete_selected_party().await, Outcome::Failed);
    assert_eq!(selected_id(&planner).await, Some(PartyId(2)));
    assert_eq!(planner.gateway().calls().last(), Some(&"delete_party"));
}

#[tokio::test]
async fn delete_without_selection_is_skipped() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;

    assert_eq!(planner.delete_selected_party().await, Outcome::Skipped);
    assert!(!planner.gateway().calls().contains(&"delete_party"));
}

#[tokio::test]
async fn created_party_appears_exactly_once() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;

    assert_eq!(planner.submit_new_party(draft("Fourth")).await, Outcome::Applied);
    let state = planner.snapshot().await;
    let matching = state.parties().iter().filter(|p| p.name == "Fourth").count();
    assert_eq!(matching, 1);
    assert_eq!(state.parties().len(), 4);
    assert_eq!(
        &planner.gateway().calls()[3..],
        &["create_party", "list_parties"]
    );
}

#[tokio::test]
async fn create_answered_with_error_status_still_refreshes() {
    let planner = planner(FakeGateway::scenario().reject("create_party"));
    planner.bootstrap().await;
    let renders_before = render_count(&planner).await;

    assert_eq!(planner.submit_new_party(draft("Nope")).await, Outcome::Applied);
    assert_eq!(
        &planner.gateway().calls()[3..],
        &["create_party", "list_parties"]
    );
    assert_eq!(planner.snapshot().await.parties().len(), 3);
    assert_eq!(render_count(&planner).await, renders_before + 1);
}

#[tokio::test]
async fn unreachable_create_does_not_refresh() {
    let planner = planner(FakeGateway::scenario().fail_on("create_party"));
    planner.bootstrap().await;
    let renders_before = render_count(&planner).await;

    assert_eq!(planner.submit_new_party(draft("Nope")).await, Outcome::Failed);
    assert_eq!(render_count(&planner).await, renders_before);
    assert_eq!(planner.snapshot().await.parties().len(), 3);
    assert_eq!(planner.gateway().calls().last(), Some(&"create_party"));
}

#[tokio::test]
async fn failed_fetch_keeps_last_good_state_without_render() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;
    planner.gateway().inner.lock().expect("lock").failing.push("list_guests");
    let renders_before = render_count(&planner).await;

    assert_eq!(planner.refresh_guests().await, Outcome::Failed);
    assert_eq!(planner.snapshot().await.guests().len(), 2);
    assert_eq!(render_count(&planner).await, renders_before);
}

#[tokio::test]
async fn bootstrap_survives_failed_rsvp_fetch() {
    let planner = planner(FakeGateway::scenario().fail_on("list_rsvps"));
    planner.bootstrap().await;

    let state = planner.snapshot().await;
    assert!(state.rsvps().is_empty());
    assert_eq!(state.guests().len(), 2);
    assert_eq!(render_count(&planner).await, 3);
}

#[tokio::test]
async fn failed_selection_keeps_previous_selection() {
    let planner = planner(FakeGateway::scenario());
    planner.bootstrap().await;
    planner.select_party(PartyId(1)).await;

    assert_eq!(planner.select_party(PartyId(99)).await, Outcome::Failed);
    assert_eq!(selected_id(&planner).await, Some(PartyId(1)));
}
