use thiserror::Error;

use crate::store::StoreError;

/// 服务器启动和运行期错误
///
/// 请求级错误使用 [`shared::error::AppError`]，这里只覆盖进程级失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("工作目录初始化失败: {0}")]
    WorkDir(#[from] std::io::Error),

    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    #[error("端口绑定失败 {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
