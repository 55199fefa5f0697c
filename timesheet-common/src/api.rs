use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Keys of the server summary that the client is allowed to show.
pub const SUMMARY_WHITELIST: [&str; 3] = ["times", "total-hours", "average-day"];

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PingResponse {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope used by logout and delete.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Entry ids come back from the server either as numbers or as strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireId::Number(v) => write!(f, "{v}"),
            WireId::Text(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WireId>,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end: Option<OffsetDateTime>,
    /// Break length in whole minutes.
    #[serde(default)]
    pub breaks: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EntryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub entry: Option<EntryPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EntriesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub entries: Vec<EntryPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RangeRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

/// The summary is an open JSON object; the client filters it down to
/// [`SUMMARY_WHITELIST`].
pub type SummaryResponse = serde_json::Map<String, serde_json::Value>;
