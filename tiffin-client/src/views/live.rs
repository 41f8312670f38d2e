//! Rows kept current by a live subscription

use serde::de::DeserializeOwned;
use shared::message::LiveMessage;

use crate::notice::Notice;
use crate::subscription::Subscription;
use crate::views::decode_snapshot;

/// The latest snapshot of one subscribed query
///
/// Every snapshot replaces the rows. An error frame or a bad document ends
/// the subscription and leaves an error notice.
#[derive(Debug)]
pub struct LiveList<T> {
    subscription: Option<Subscription>,
    rows: Vec<T>,
    error: Option<Notice>,
}

impl<T> Default for LiveList<T> {
    fn default() -> Self {
        Self {
            subscription: None,
            rows: Vec::new(),
            error: None,
        }
    }
}

impl<T: DeserializeOwned> LiveList<T> {
    /// Start following `subscription`, releasing any previous one
    pub fn attach(&mut self, subscription: Subscription) {
        self.close();
        self.rows.clear();
        self.error = None;
        self.subscription = Some(subscription);
    }

    /// Release the subscription; rows stay as last seen
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    pub fn is_live(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|s| !s.is_cancelled())
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// Wait for the next frame and apply it
    ///
    /// Returns `false` once there is nothing left to wait for.
    pub async fn update(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.next().await {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => {
                self.subscription = None;
                false
            }
        }
    }

    /// Apply every frame already received, without waiting
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.subscription.as_mut().and_then(|s| s.try_next()) {
            self.apply(msg);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, msg: LiveMessage) {
        match decode_snapshot(msg) {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Live subscription failed");
                self.close();
                self.error = Some(Notice::error("Live updates stopped. Please reload."));
            }
        }
    }
}
