//! Message poll loop.
//!
//! Periodically fetches the recent-message list and forwards each batch to
//! the UI layer. Cancellation is an explicit `Stop` command, not drop
//! timing: on teardown the loop ends deterministically and no late response
//! can mutate UI state afterwards. A failed or hung tick only costs that one
//! refresh; the next tick is independent.

use crate::api_client::ChatApiClient;
use crate::error::{ClientError, ClientResult};
use crate::types::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Commands sent to the poll loop.
#[derive(Debug)]
pub enum PollerCommand {
    Stop,
    /// Fetch immediately instead of waiting for the next tick.
    RefreshNow,
}

/// Handle for controlling a running poller.
#[derive(Clone)]
pub struct PollerHandle {
    command_tx: mpsc::Sender<PollerCommand>,
}

impl PollerHandle {
    /// Stops the poll loop. Deterministic teardown contract.
    pub async fn stop(&self) -> ClientResult<()> {
        self.command_tx
            .send(PollerCommand::Stop)
            .await
            .map_err(|_| ClientError::Api("poller not running".to_string()))
    }

    pub async fn refresh_now(&self) -> ClientResult<()> {
        self.command_tx
            .send(PollerCommand::RefreshNow)
            .await
            .map_err(|_| ClientError::Api("poller not running".to_string()))
    }
}

/// Message poll loop.
pub struct MessagePoller {
    api: Arc<ChatApiClient>,
    command_rx: mpsc::Receiver<PollerCommand>,
    message_tx: mpsc::Sender<Vec<Message>>,
    poll_interval: Duration,
}

/// Creates a poller, its control handle, and the receiver for message
/// batches. The caller drives the loop with [`MessagePoller::run`],
/// typically inside `tokio::spawn`.
pub fn create_poller(
    api: Arc<ChatApiClient>,
    poll_interval: Duration,
) -> (PollerHandle, mpsc::Receiver<Vec<Message>>, MessagePoller) {
    let (command_tx, command_rx) = mpsc::channel(16);
    let (message_tx, message_rx) = mpsc::channel(16);

    let handle = PollerHandle { command_tx };
    let poller = MessagePoller {
        api,
        command_rx,
        message_tx,
        poll_interval,
    };

    (handle, message_rx, poller)
}

impl MessagePoller {
    /// Runs the poll loop until stopped.
    pub async fn run(mut self) {
        info!("message poller started ({:?} interval)", self.poll_interval);

        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.poll_once().await;
                }
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(PollerCommand::RefreshNow) => {
                            self.poll_once().await;
                        }
                        Some(PollerCommand::Stop) => {
                            info!("message poller stopping");
                            break;
                        }
                        None => {
                            debug!("poller handle dropped, stopping");
                            break;
                        }
                    }
                }
            }
        }

        info!("message poller stopped");
    }

    async fn poll_once(&mut self) {
        match self.api.recent_messages().await {
            Ok(messages) => {
                debug!("poll tick: {} messages", messages.len());
                if self.message_tx.send(messages).await.is_err() {
                    // Receiver gone; nothing left to feed
                    debug!("message receiver dropped");
                }
            }
            Err(e) => {
                // A failed tick is silent at the user level; the next tick
                // retries on schedule.
                warn!("message poll failed: {e}");
            }
        }
    }
}
