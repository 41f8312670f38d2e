//! 服务模块
//!
//! - [`https`] - 路由与中间件组装
//! - [`image_host`] - 图床上传
//! - [`bootstrap`] - 首个管理员

pub mod bootstrap;
pub mod https;
pub mod image_host;

pub use image_host::{ImageHost, ImageUpload, UploadError};
