//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录、身份与角色
//! - [`staff`] - 员工账号开通
//! - [`menu`] - 菜单管理接口
//! - [`gallery`] - 相册接口
//! - [`upload`] - 图片上传 (转发到图床)
//! - [`reservations`] - 订座接口
//! - [`preorders`] - 预订单接口
//! - [`kitchen`] - 厨房看板接口
//! - [`contacts`] - 联系留言
//! - [`feedback`] - 顾客评价
//! - [`live`] - 实时订阅 (WebSocket)

pub mod common;

pub mod auth;
pub mod health;
pub mod live;
pub mod staff;
pub mod upload;

// Customer facing
pub mod contacts;
pub mod feedback;
pub mod gallery;
pub mod menu;
pub mod preorders;
pub mod reservations;

// Back office
pub mod kitchen;

// Re-export common types for handlers
pub use crate::utils::{ApiResult, AppResult};
