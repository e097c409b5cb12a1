//! REST routes and response envelopes of the remote event service.

use serde::{Deserialize, Serialize};

use crate::domain::PartyId;

pub const EVENTS_PATH: &str = "/events";
pub const RSVPS_PATH: &str = "/rsvps";
pub const GUESTS_PATH: &str = "/guests";

pub fn event_path(id: PartyId) -> String {
    format!("{EVENTS_PATH}/{id}")
}

/// Every successful read wraps its payload as `{ "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Reads a missing or `null` string as empty.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// RFC 3339 in UTC with millisecond precision and a `Z` suffix.
pub mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
