//! Owned live feeds
//!
//! A [`Subscription`] is the receiving half; whoever produces messages
//! (the socket reader task, or a test fake) holds the [`SubscriptionFeed`].
//! Both share a `CancellationToken` that is cancelled when the
//! subscription is dropped, which stops the producer and closes the socket.

use shared::message::{Collection, LiveMessage};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Buffered live messages per subscription
pub const LIVE_BUFFER: usize = 32;

/// What a live socket watches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveTopic {
    /// A customer's orders, newest first
    Orders { phone: String },
    /// Orders on the kitchen board, oldest first
    Kitchen,
    /// One back-office collection
    Collection(Collection),
}

impl LiveTopic {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Orders { .. } | Self::Kitchen => Collection::Preorders,
            Self::Collection(c) => *c,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Orders { .. } => "/api/live/orders".to_string(),
            Self::Kitchen => "/api/live/kitchen".to_string(),
            Self::Collection(c) => format!("/api/live/{c}"),
        }
    }

    /// Staff topics authenticate with `?token=`
    pub fn needs_token(&self) -> bool {
        !matches!(self, Self::Orders { .. })
    }
}

/// Receiving half of a live feed
#[derive(Debug)]
pub struct Subscription {
    topic: LiveTopic,
    rx: mpsc::Receiver<LiveMessage>,
    cancel: CancellationToken,
}

/// Producing half of a live feed
#[derive(Debug, Clone)]
pub struct SubscriptionFeed {
    tx: mpsc::Sender<LiveMessage>,
    cancel: CancellationToken,
}

impl Subscription {
    pub fn channel(topic: LiveTopic) -> (SubscriptionFeed, Subscription) {
        let (tx, rx) = mpsc::channel(LIVE_BUFFER);
        let cancel = CancellationToken::new();
        (
            SubscriptionFeed {
                tx,
                cancel: cancel.clone(),
            },
            Subscription { topic, rx, cancel },
        )
    }

    pub fn topic(&self) -> &LiveTopic {
        &self.topic
    }

    /// Next message; `None` once the feed ended or this was cancelled
    pub async fn next(&mut self) -> Option<LiveMessage> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            msg = self.rx.recv() => msg,
        }
    }

    /// Next buffered message without waiting
    pub fn try_next(&mut self) -> Option<LiveMessage> {
        if self.cancel.is_cancelled() {
            return None;
        }
        self.rx.try_recv().ok()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl SubscriptionFeed {
    /// Deliver a message; `false` once the subscription is gone
    pub async fn send(&self, msg: LiveMessage) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.tx.send(msg).await.is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancel.cancelled()
    }
}
