//! Long-lived feed for one watched board.
//!
//! [`BoardFeed`] owns the connect -> process -> reconnect lifecycle on a
//! background task and broadcasts [`BoardEvent`]s via a
//! [`tokio::sync::broadcast`] channel. Call [`BoardFeed::subscribe`] to
//! receive them.

use std::time::Duration;

use crowdcolor_core::types::BoardId;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::client::RealtimeClient;
use crate::config::SupabaseConfig;
use crate::events::BoardEvent;
use crate::processor::run_session;

/// Broadcast channel capacity for feed events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Delay before the first reconnect attempt.
const RECONNECT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Ceiling on the reconnect delay.
const RECONNECT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Handle to a running feed task for one board.
pub struct BoardFeed {
    board_id: BoardId,
    event_tx: broadcast::Sender<BoardEvent>,
    /// Cancelled during shutdown.
    cancel: CancellationToken,
    task_handle: tokio::task::JoinHandle<()>,
}

impl BoardFeed {
    /// Spawn the feed task and return a handle to it.
    pub fn start(config: &SupabaseConfig, board_id: BoardId) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();

        let client = RealtimeClient::new(config, board_id);
        let tx = event_tx.clone();
        let task_cancel = cancel.clone();

        let task_handle = tokio::spawn(async move {
            tracing::info!(board_id = %board_id, "Starting feed task");
            run_feed_loop(&client, &tx, &task_cancel).await;
            tracing::info!(board_id = %board_id, "Feed task exited");
        });

        Self {
            board_id,
            event_tx,
            cancel,
            task_handle,
        }
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Subscribe to feed events.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.event_tx.subscribe()
    }

    /// Gracefully stop the feed task, waiting up to 5 seconds for a
    /// clean exit.
    pub async fn shutdown(self) {
        tracing::info!(board_id = %self.board_id, "Shutting down feed");
        self.cancel.cancel();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.task_handle).await;
    }
}

/// Doubling reconnect delay for one board's feed.
///
/// Reset whenever a session is established, so a drop after a long
/// stable stretch retries promptly rather than at the ceiling.
#[derive(Debug)]
struct Backoff {
    delay: Duration,
}

impl Backoff {
    fn new() -> Self {
        Self {
            delay: RECONNECT_INITIAL_DELAY,
        }
    }

    /// The delay to wait now. Doubles for the next call, capped at
    /// [`RECONNECT_MAX_DELAY`].
    fn step(&mut self) -> Duration {
        let current = self.delay;
        self.delay = (current * 2).min(RECONNECT_MAX_DELAY);
        current
    }

    fn reset(&mut self) {
        self.delay = RECONNECT_INITIAL_DELAY;
    }
}

/// Core feed loop: connect with backoff, process until the session
/// ends, announce the drop, repeat. Returns only on cancellation.
async fn run_feed_loop(
    client: &RealtimeClient,
    event_tx: &broadcast::Sender<BoardEvent>,
    cancel: &CancellationToken,
) {
    let board_id = client.board_id();
    let mut backoff = Backoff::new();
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let conn = tokio::select! {
            _ = cancel.cancelled() => return,
            result = client.connect() => match result {
                Ok(conn) => conn,
                Err(e) => {
                    let delay = backoff.step();
                    tracing::warn!(
                        board_id = %board_id,
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Feed connect failed, retrying",
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return,
                        _ = tokio::time::sleep(delay) => {}
                    }
                    continue;
                }
            },
        };

        backoff.reset();
        attempt = 0;

        if let Err(e) = run_session(conn, event_tx, cancel).await {
            tracing::error!(board_id = %board_id, error = %e, "Realtime session error");
        }

        if cancel.is_cancelled() {
            return;
        }

        let _ = event_tx.send(BoardEvent::FeedDisconnected { board_id });
        tracing::info!(board_id = %board_id, "Feed connection lost, reconnecting");
    }
}
