//! 预订单模块
//!
//! - [`OrderLifecycle`] - 提交与状态推进
//! - [`queries`] - 查单、厨房看板等共享查询

pub mod lifecycle;
pub mod queries;

pub use lifecycle::OrderLifecycle;
