//! Debounces bursts of chat input into single conversation triggers.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::types::ChatMessage;

const CHANNEL_CAPACITY: usize = 64;

/// One line of chat from another player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub username: String,
    pub text: String,
}

impl IncomingMessage {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
        }
    }

    pub fn into_chat_message(self) -> ChatMessage {
        ChatMessage::user(format!("User {} said: {}", self.username, self.text))
            .with_name(self.username)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("message coalescer has shut down")]
pub struct CoalescerClosed;

/// Front half of the debouncer. Each pushed message restarts the quiet-period
/// countdown; when it elapses, everything buffered is delivered as one batch
/// on the receiver returned by [`spawn`](Self::spawn).
#[derive(Debug)]
pub struct MessageCoalescer {
    input: mpsc::Sender<IncomingMessage>,
    worker: JoinHandle<()>,
}

impl MessageCoalescer {
    pub fn spawn(window: Duration) -> (Self, mpsc::Receiver<Vec<IncomingMessage>>) {
        let (input, inbox) = mpsc::channel(CHANNEL_CAPACITY);
        let (batches, output) = mpsc::channel(CHANNEL_CAPACITY);
        let worker = tokio::spawn(run(window, inbox, batches));
        (Self { input, worker }, output)
    }

    pub async fn push(&self, message: IncomingMessage) -> Result<(), CoalescerClosed> {
        self.input.send(message).await.map_err(|_| CoalescerClosed)
    }

    /// Stops accepting input, flushes what is buffered and waits for the
    /// worker to finish.
    pub async fn close(self) {
        drop(self.input);
        join_worker(self.worker).await;
    }
}

/// Waits for the worker and reports whether it exited cleanly.
async fn join_worker(worker: JoinHandle<()>) -> bool {
    match worker.await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "Message coalescer worker did not finish cleanly");
            false
        }
    }
}

async fn run(
    window: Duration,
    mut inbox: mpsc::Receiver<IncomingMessage>,
    batches: mpsc::Sender<Vec<IncomingMessage>>,
) {
    while let Some(first) = inbox.recv().await {
        let mut batch = vec![first];
        let mut open = true;
        while open {
            match timeout(window, inbox.recv()).await {
                Ok(Some(message)) => batch.push(message),
                Ok(None) => open = false,
                Err(_elapsed) => break,
            }
        }

        debug!(messages = batch.len(), "flushing coalesced input");
        if batches.send(batch).await.is_err() || !open {
            return;
        }
    }
}
