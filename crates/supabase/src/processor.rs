//! Realtime session loop.
//!
//! Drives one established WebSocket connection: joins the board channel,
//! keeps the connection alive with heartbeats, parses incoming frames
//! via [`parse_frame`], and emits [`BoardEvent`]s to the broadcast
//! channel. Returns when the connection drops or the session is
//! cancelled.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::client::{RealtimeClientError, RealtimeConnection};
use crate::events::BoardEvent;
use crate::messages::{heartbeat_frame, join_frame, parse_frame, PhoenixFrame, RealtimeMessage};

/// Interval between heartbeat frames. The service times out silent
/// connections well above this, so 30s leaves plenty of margin.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Drive one realtime session to completion.
///
/// Emits [`BoardEvent::FeedConnected`] once the channel join is sent and
/// pixel events as they arrive. The caller owns reconnection; this
/// function simply returns when the session ends.
pub async fn run_session(
    conn: RealtimeConnection,
    event_tx: &broadcast::Sender<BoardEvent>,
    cancel: &CancellationToken,
) -> Result<(), RealtimeClientError> {
    let board_id = conn.board_id;
    let (mut sink, mut stream) = conn.ws_stream.split();

    send_frame(&mut sink, &join_frame(board_id, &conn.anon_key)).await?;
    let _ = event_tx.send(BoardEvent::FeedConnected { board_id });

    let mut ticker = tokio::time::interval(HEARTBEAT_INTERVAL);
    // The first tick fires immediately; the join just went out.
    ticker.tick().await;
    // Ref 1 was used by the join frame.
    let mut heartbeat_ref: u64 = 2;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(board_id = %board_id, "Realtime session cancelled");
                let _ = sink.send(Message::Close(None)).await;
                return Ok(());
            }
            _ = ticker.tick() => {
                send_frame(&mut sink, &heartbeat_frame(heartbeat_ref)).await?;
                heartbeat_ref += 1;
            }
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if !handle_text_frame(&text, board_id, event_tx) {
                            return Ok(());
                        }
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                        // Handled automatically by tungstenite.
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(board_id = %board_id, ?frame, "Realtime WebSocket closed");
                        return Ok(());
                    }
                    Some(Ok(_)) => {
                        // Binary / Frame -- the service never sends these.
                    }
                    Some(Err(e)) => {
                        tracing::error!(board_id = %board_id, error = %e, "WebSocket receive error");
                        return Ok(());
                    }
                    None => {
                        tracing::info!(board_id = %board_id, "WebSocket stream exhausted");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handle one text frame. Returns `false` when the channel is down and
/// the session should end.
fn handle_text_frame(
    text: &str,
    board_id: crowdcolor_core::types::BoardId,
    event_tx: &broadcast::Sender<BoardEvent>,
) -> bool {
    match parse_frame(text) {
        Ok(RealtimeMessage::PostgresChange(data)) => {
            if let Some(pixel) = data.record {
                tracing::debug!(
                    board_id = %board_id,
                    pixel_index = pixel.pixel_index,
                    change = %data.change_type,
                    "Pixel change received",
                );
                let _ = event_tx.send(BoardEvent::PixelChanged { pixel });
            }
            true
        }
        Ok(RealtimeMessage::Reply { status }) => {
            if status != "ok" {
                tracing::warn!(board_id = %board_id, status = %status, "Non-ok channel reply");
            }
            true
        }
        Ok(RealtimeMessage::System) => true,
        Ok(RealtimeMessage::ChannelDown { event }) => {
            tracing::warn!(board_id = %board_id, event = %event, "Channel closed by server");
            false
        }
        Ok(RealtimeMessage::Unknown { event }) => {
            tracing::debug!(board_id = %board_id, event = %event, "Ignoring unknown event");
            true
        }
        Err(e) => {
            tracing::warn!(
                board_id = %board_id,
                error = %e,
                raw_frame = %text,
                "Failed to parse realtime frame",
            );
            true
        }
    }
}

async fn send_frame<S>(sink: &mut S, frame: &PhoenixFrame) -> Result<(), RealtimeClientError>
where
    S: SinkExt<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let text = serde_json::to_string(frame)
        .map_err(|e| RealtimeClientError::Protocol(format!("Failed to encode frame: {e}")))?;
    sink.send(Message::Text(text.into()))
        .await
        .map_err(|e| RealtimeClientError::Protocol(format!("Failed to send frame: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdcolor_core::types::BoardId;

    fn board_id() -> BoardId {
        "f47ac10b-58cc-4372-a567-0e02b2c3d479".parse().unwrap()
    }

    #[test]
    fn pixel_change_is_broadcast() {
        let (tx, mut rx) = broadcast::channel(8);
        let frame = r#"{
            "topic": "realtime:board-f47ac10b-58cc-4372-a567-0e02b2c3d479",
            "event": "postgres_changes",
            "payload": {"data": {
                "schema": "public",
                "table": "pixels",
                "type": "UPDATE",
                "record": {
                    "board_id": "f47ac10b-58cc-4372-a567-0e02b2c3d479",
                    "pixel_index": 5,
                    "r": 16, "g": 185, "b": 129, "a": 255,
                    "updated_at": "2024-05-02T08:30:00Z"
                }
            }},
            "ref": null
        }"#;

        assert!(handle_text_frame(frame, board_id(), &tx));
        match rx.try_recv().unwrap() {
            BoardEvent::PixelChanged { pixel } => {
                assert_eq!(pixel.pixel_index, 5);
                assert_eq!(pixel.g, 185);
            }
            other => panic!("Expected PixelChanged, got {other:?}"),
        }
    }

    #[test]
    fn channel_error_ends_the_session() {
        let (tx, _rx) = broadcast::channel(8);
        let frame = r#"{"topic":"t","event":"phx_error","payload":{},"ref":null}"#;
        assert!(!handle_text_frame(frame, board_id(), &tx));
    }

    #[test]
    fn garbage_frames_are_survivable() {
        let (tx, _rx) = broadcast::channel(8);
        assert!(handle_text_frame("]]garbage", board_id(), &tx));
    }

    #[test]
    fn delete_without_record_emits_nothing() {
        let (tx, mut rx) = broadcast::channel(8);
        let frame = r#"{
            "topic": "t",
            "event": "postgres_changes",
            "payload": {"data": {"schema": "public", "table": "pixels", "type": "DELETE"}},
            "ref": null
        }"#;
        assert!(handle_text_frame(frame, board_id(), &tx));
        assert!(rx.try_recv().is_err());
    }
}
