//! Tiffin Server - 餐厅预订单、订座与后厨后台
//!
//! # 架构概述
//!
//! - **文档存储** (`store`): redb 上的 JSON 文档集合，支持过滤查询和实时订阅
//! - **变更总线** (`message`): 每次写入广播一个变更事件
//! - **认证** (`auth`): 邮箱密码身份 + JWT + 角色网关
//! - **预订单** (`orders`): 状态机驱动的订单生命周期
//! - **HTTP API** (`api`): REST 接口与 WebSocket 实时推送
//!
//! # 模块结构
//!
//! ```text
//! tiffin-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── store/         # 文档存储、查询、Watch
//! ├── message/       # 变更总线、live 连接计数
//! ├── auth/          # JWT、密码、账号、角色
//! ├── orders/        # 预订单生命周期
//! ├── services/      # 路由组装、图床、首个管理员
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、统一响应
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod message;
pub mod orders;
pub mod services;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use message::ChangeBus;
pub use orders::OrderLifecycle;
pub use services::https::build_app;
pub use store::DocumentStore;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
  _____ _  __  __ _
 |_   _(_)/ _|/ _(_)_ __
   | | | | |_| |_| | '_ \
   | | | |  _|  _| | | | |
   |_| |_|_| |_| |_|_| |_|
        server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
