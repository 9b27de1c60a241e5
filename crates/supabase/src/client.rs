//! WebSocket client for the Supabase realtime service.
//!
//! [`RealtimeClient`] holds the connection configuration for one board's
//! feed. Call [`RealtimeClient::connect`] to establish a live
//! [`RealtimeConnection`] over WebSocket; joining the board channel is
//! the processor's job.

use crowdcolor_core::types::BoardId;
use tokio_tungstenite::{connect_async, MaybeTlsStream};

use crate::config::SupabaseConfig;

/// Configuration handle for one board's realtime feed.
pub struct RealtimeClient {
    board_id: BoardId,
    ws_url: String,
    anon_key: String,
}

/// A live WebSocket connection to the realtime service.
pub struct RealtimeConnection {
    /// The board whose channel this connection will join.
    pub board_id: BoardId,
    /// Access token for the channel join (the project anon key).
    pub anon_key: String,
    /// The raw WebSocket stream for reading/writing frames.
    pub ws_stream: tokio_tungstenite::WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl RealtimeClient {
    pub fn new(config: &SupabaseConfig, board_id: BoardId) -> Self {
        Self {
            board_id,
            ws_url: config.realtime_ws_url(),
            anon_key: config.anon_key.clone(),
        }
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Connect to the realtime WebSocket endpoint.
    pub async fn connect(&self) -> Result<RealtimeConnection, RealtimeClientError> {
        let (ws_stream, _response) = connect_async(&self.ws_url).await.map_err(|e| {
            RealtimeClientError::Connection(format!("Failed to connect to realtime service: {e}"))
        })?;

        tracing::info!(board_id = %self.board_id, "Connected to realtime service");

        Ok(RealtimeConnection {
            board_id: self.board_id,
            anon_key: self.anon_key.clone(),
            ws_stream,
        })
    }
}

/// Errors that can occur when working with the WebSocket client.
#[derive(Debug, thiserror::Error)]
pub enum RealtimeClientError {
    /// Failed to establish the initial WebSocket connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A protocol-level error on an already-established connection.
    #[error("Protocol error: {0}")]
    Protocol(String),
}
