//! 消息模块
//!
//! - [`ChangeBus`] - 存储写入事件广播
//! - [`LiveConnections`] - live 连接名额

pub mod bus;
pub mod connections;

pub use bus::{ChangeBus, DEFAULT_CHANNEL_CAPACITY};
pub use connections::{LiveConnections, LiveSlot, MAX_LIVE_PER_KEY};
