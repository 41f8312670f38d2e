//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前身份
//! - [`accounts`] - 邮箱/密码身份提供者
//! - [`roles`] - 角色查询与检查
//! - [`require_auth`] / [`require_role`] - 中间件

pub mod accounts;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod roles;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, require_auth, require_role};
pub use roles::{assign_role, authorize, lookup_role};
