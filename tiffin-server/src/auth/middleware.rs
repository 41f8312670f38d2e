//! 认证中间件
//!
//! 为 JWT 认证和角色授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;
use shared::models::{Role, RoleLookup};

use super::roles::{authorize, lookup_role};
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 无需令牌的 API 路由
///
/// `GET /api/preorders` 只有带非空 `phone` 查询参数时才公开 (顾客查单)。
/// `/api/live/*` 在处理函数内自行校验 `?token=`。
pub fn is_public_route(method: &Method, path: &str, query: Option<&str>) -> bool {
    if path == "/api/auth/login" || path.starts_with("/api/live/") {
        return true;
    }
    match *method {
        Method::GET => match path {
            "/api/menu" | "/api/gallery" => true,
            "/api/preorders" => has_phone(query),
            _ => false,
        },
        Method::POST => matches!(
            path,
            "/api/reservations" | "/api/preorders" | "/api/contacts" | "/api/feedback"
        ),
        _ => false,
    }
}

fn has_phone(query: Option<&str>) -> bool {
    query
        .into_iter()
        .flat_map(|q| q.split('&'))
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, value)| key == "phone" && !value.trim().is_empty())
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 和本次请求新查询的 [`RoleLookup`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - [`is_public_route`] 列出的公共接口
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path, req.uri().query()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!(WARN, "auth_missing", uri = %req.uri());
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            let lookup = lookup_role(&state.store, &user.uid);
            req.extensions_mut().insert(user);
            req.extensions_mut().insert(lookup);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(WARN, "auth_failed", error = %e, uri = %req.uri());

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 角色检查中间件 - 要求角色属于 `allowed`
///
/// 必须位于 [`require_auth`] 之后。角色来自 `require_auth` 注入的
/// [`RoleLookup`]，从不假定默认角色。
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_role(&[Role::Admin])));
/// ```
///
/// # 错误
///
/// | 情况 | HTTP 状态码 |
/// |------|------------|
/// | 未登录 | 401 |
/// | 无角色 / 角色不符 | 403 |
/// | 角色查询失败 | 500 |
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            authorize(
                req.extensions().get::<CurrentUser>(),
                req.extensions().get::<RoleLookup>(),
                allowed,
            )?;
            Ok(next.run(req).await)
        })
    }
}

/// 从请求中提取 CurrentUser 的扩展方法
pub trait CurrentUserExt {
    /// 未认证返回 401 Unauthorized
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or(AppError::unauthorized())
    }
}
