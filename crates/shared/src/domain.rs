use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PartyId);
id_newtype!(GuestId);

/// A plannable occasion. The remote service calls these "events".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    #[serde(default, deserialize_with = "crate::protocol::null_as_empty")]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "crate::protocol::null_as_empty")]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
}

/// Links one guest to one party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub guest_id: GuestId,
    pub event_id: PartyId,
}

/// Payload for creating a party. The id is assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyDraft {
    pub name: String,
    pub description: String,
    #[serde(with = "crate::protocol::millis_timestamp")]
    pub date: DateTime<Utc>,
    pub location: String,
}
