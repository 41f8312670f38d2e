//! 变更总线
//!
//! ```text
//! DocumentStore ──publish()──▶ broadcast::Sender<ChangeEvent>
//!                                   │
//!            ┌──────────────────────┼──────────────────────┐
//!            ▼                      ▼                      ▼
//!       Watch (orders)       Watch (kitchen)       Watch (admin menu)
//! ```
//!
//! 每次存储写入发布一个事件。订阅者落后 (Lagged) 时不补发缺口，
//! 而是重新读取完整快照。

use shared::message::ChangeEvent;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Default capacity of the broadcast channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// 变更总线 - 存储写入事件的广播通道
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<ChangeEvent>,
    /// 关闭信号令牌，live 连接在关闭时退出
    shutdown_token: CancellationToken,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 发布事件
    ///
    /// 没有订阅者不是错误，返回收到事件的订阅者数量。
    pub fn publish(&self, event: ChangeEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(collection = %event.collection, id = %event.id, "No live subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// 通知所有 live 连接关闭
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}
