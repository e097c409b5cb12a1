//! Remote data gateway over the event service's REST API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Guest, Party, PartyDraft, PartyId, Rsvp},
    protocol::{event_path, DataEnvelope, EVENTS_PATH, GUESTS_PATH, RSVPS_PATH},
};
use tracing::debug;

use crate::{config::Settings, error::GatewayError};

/// One network round trip per call. Implementations never touch
/// application state; handlers decide what to do with the result.
#[async_trait]
pub trait PartyGateway: Send + Sync {
    async fn list_parties(&self) -> Result<Vec<Party>, GatewayError>;
    async fn get_party(&self, id: PartyId) -> Result<Party, GatewayError>;
    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, GatewayError>;
    async fn list_guests(&self) -> Result<Vec<Guest>, GatewayError>;
    /// Writes report an error status as `GatewayError::Status`; the service
    /// still answered, so callers run their follow-up refresh regardless.
    async fn create_party(&self, draft: &PartyDraft) -> Result<(), GatewayError>;
    async fn delete_party(&self, id: PartyId) -> Result<(), GatewayError>;
}

pub struct HttpPartyGateway {
    http: Client,
    api_root: String,
}

impl HttpPartyGateway {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_root: api_root.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GatewayError> {
        Ok(Self::new(settings.api_root()?))
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.clone(),
                source,
            })?;
        let body = ensure_success(&url, res)?
            .bytes()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.clone(),
                source,
            })?;
        let envelope: DataEnvelope<T> =
            serde_json::from_slice(&body).map_err(|source| GatewayError::Decode { url, source })?;
        Ok(envelope.into_inner())
    }
}

fn ensure_success(url: &str, res: Response) -> Result<Response, GatewayError> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        Err(GatewayError::Status {
            url: url.to_string(),
            status,
        })
    }
}

#[async_trait]
impl PartyGateway for HttpPartyGateway {
    async fn list_parties(&self) -> Result<Vec<Party>, GatewayError> {
        self.get_data(EVENTS_PATH).await
    }

    async fn get_party(&self, id: PartyId) -> Result<Party, GatewayError> {
        self.get_data(&event_path(id)).await
    }

    async fn list_rsvps(&self) -> Result<Vec<Rsvp>, GatewayError> {
        self.get_data(RSVPS_PATH).await
    }

    async fn list_guests(&self) -> Result<Vec<Guest>, GatewayError> {
        self.get_data(GUESTS_PATH).await
    }

    async fn create_party(&self, draft: &PartyDraft) -> Result<(), GatewayError> {
        let url = self.url(EVENTS_PATH);
        debug!(%url, name = %draft.name, "POST");
        let res = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.clone(),
                source,
            })?;
        ensure_success(&url, res)?;
        Ok(())
    }

    async fn delete_party(&self, id: PartyId) -> Result<(), GatewayError> {
        let url = self.url(&event_path(id));
        debug!(%url, "DELETE");
        let res = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.clone(),
                source,
            })?;
        ensure_success(&url, res)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
