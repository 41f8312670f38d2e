//! Live 连接计数
//!
//! 每个订阅者 (手机号或员工 uid) 的并发 WebSocket 数量有上限。
//! [`LiveSlot`] 在 drop 时归还名额，计数归零的 key 会被移除。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

/// Maximum concurrent live sockets per subscriber key
pub const MAX_LIVE_PER_KEY: usize = 10;

#[derive(Debug)]
pub struct LiveConnections {
    counts: DashMap<String, AtomicUsize>,
    max_per_key: usize,
}

impl LiveConnections {
    pub fn new(max_per_key: usize) -> Self {
        Self {
            counts: DashMap::new(),
            max_per_key,
        }
    }

    /// 占用一个名额，超限返回 `Err(当前数量)`
    pub fn try_acquire(self: &Arc<Self>, key: &str) -> Result<LiveSlot, usize> {
        {
            // 原子自增后再判断，避免 TOCTOU
            let counter = self
                .counts
                .entry(key.to_string())
                .or_insert_with(|| AtomicUsize::new(0));
            let prev = counter.fetch_add(1, Ordering::SeqCst);
            if prev >= self.max_per_key {
                counter.fetch_sub(1, Ordering::SeqCst);
                return Err(prev);
            }
        }
        Ok(LiveSlot {
            registry: Arc::clone(self),
            key: key.to_string(),
        })
    }

    pub fn count(&self, key: &str) -> usize {
        self.counts
            .get(key)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// 当前持有名额的 key 数量
    pub fn tracked_keys(&self) -> usize {
        self.counts.len()
    }
}

impl Default for LiveConnections {
    fn default() -> Self {
        Self::new(MAX_LIVE_PER_KEY)
    }
}

/// 一个已占用的连接名额
#[derive(Debug)]
pub struct LiveSlot {
    registry: Arc<LiveConnections>,
    key: String,
}

impl Drop for LiveSlot {
    fn drop(&mut self) {
        // 读锁必须在 remove_if 之前释放
        if let Some(counter) = self.registry.counts.get(&self.key) {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
        self.registry
            .counts
            .remove_if(&self.key, |_, c| c.load(Ordering::SeqCst) == 0);
    }
}
