//! 工具模块
//!
//! - [`AppError`] / [`ApiResponse`] - 统一错误与响应 (from shared::error)
//! - [`logger`] - 日志初始化与审计/安全日志宏
//!
//! # 处理函数返回约定
//!
//! ```ignore
//! pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<MenuItem>> {
//!     Ok(ok(items))
//! }
//! ```

pub mod logger;

use axum::Json;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 处理函数的统一返回类型
pub type ApiResult<T> = AppResult<Json<ApiResponse<T>>>;

/// 包装成功响应
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
