//! Realtime (Phoenix) wire messages.
//!
//! The realtime service speaks the Phoenix channel protocol: every frame
//! is a JSON object `{"topic", "event", "payload", "ref"}`. This module
//! builds the outgoing frames (join, heartbeat) and parses the incoming
//! ones into a strongly-typed [`RealtimeMessage`] enum.

use crowdcolor_core::pixel::PixelOverride;
use crowdcolor_core::types::BoardId;
use serde::{Deserialize, Serialize};

/// A raw Phoenix frame, both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoenixFrame {
    pub topic: String,
    pub event: String,
    pub payload: serde_json::Value,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

/// Channel topic for a board's feed.
pub fn board_topic(board_id: BoardId) -> String {
    format!("realtime:board-{board_id}")
}

/// Build the join frame subscribing to pixel changes for one board.
///
/// The `postgres_changes` config asks the service to stream every write
/// to the `pixels` table filtered to this board; the anon key doubles as
/// the channel access token.
pub fn join_frame(board_id: BoardId, access_token: &str) -> PhoenixFrame {
    PhoenixFrame {
        topic: board_topic(board_id),
        event: "phx_join".to_string(),
        payload: serde_json::json!({
            "config": {
                "postgres_changes": [{
                    "event": "*",
                    "schema": "public",
                    "table": "pixels",
                    "filter": format!("board_id=eq.{board_id}"),
                }],
            },
            "access_token": access_token,
        }),
        reference: Some("1".to_string()),
    }
}

/// Build a heartbeat frame. The service drops connections that go
/// silent, so one of these is sent on a fixed interval.
pub fn heartbeat_frame(reference: u64) -> PhoenixFrame {
    PhoenixFrame {
        topic: "phoenix".to_string(),
        event: "heartbeat".to_string(),
        payload: serde_json::json!({}),
        reference: Some(reference.to_string()),
    }
}

/// An incoming frame, classified by its `event` field.
#[derive(Debug, Clone)]
pub enum RealtimeMessage {
    /// Reply to a join or heartbeat (`phx_reply`).
    Reply { status: String },

    /// A row change on the subscribed table (`postgres_changes`).
    PostgresChange(PostgresChangeData),

    /// Service housekeeping (`system`) or presence traffic; ignorable.
    System,

    /// The channel was closed or errored server-side.
    ChannelDown { event: String },

    /// An event this client does not model.
    Unknown { event: String },
}

/// The `data` object inside a `postgres_changes` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresChangeData {
    pub schema: String,
    pub table: String,
    /// `INSERT`, `UPDATE`, or `DELETE`.
    #[serde(rename = "type")]
    pub change_type: String,
    /// The row after the change. Absent on deletes.
    pub record: Option<PixelOverride>,
}

/// Errors from parsing an incoming frame.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The frame was not valid JSON or not a Phoenix frame at all.
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A `postgres_changes` frame without its `data` object.
    #[error("postgres_changes frame missing payload data")]
    MissingChangeData,
}

/// Parse one incoming text frame.
pub fn parse_frame(text: &str) -> Result<RealtimeMessage, ParseError> {
    let frame: PhoenixFrame = serde_json::from_str(text)?;
    match frame.event.as_str() {
        "phx_reply" => {
            let status = frame
                .payload
                .get("status")
                .and_then(|s| s.as_str())
                .unwrap_or("unknown")
                .to_string();
            Ok(RealtimeMessage::Reply { status })
        }
        "postgres_changes" => {
            let data = frame
                .payload
                .get("data")
                .ok_or(ParseError::MissingChangeData)?;
            let data: PostgresChangeData = serde_json::from_value(data.clone())?;
            Ok(RealtimeMessage::PostgresChange(data))
        }
        "system" | "presence_state" | "presence_diff" => Ok(RealtimeMessage::System),
        "phx_close" | "phx_error" => Ok(RealtimeMessage::ChannelDown { event: frame.event }),
        _ => Ok(RealtimeMessage::Unknown { event: frame.event }),
    }
}
