use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./tiffin-data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false (production: true) | JSON 日志 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
/// | CHANNEL_CAPACITY | 1024 | 变更广播通道容量 |
/// | IMAGE_HOST_UPLOAD_URL | - | 图床上传地址 (未设置则禁用上传) |
/// | IMAGE_HOST_UPLOAD_PRESET | - | 图床 unsigned upload preset |
/// | MAX_UPLOAD_BYTES | 5242880 | 上传文件大小上限 |
/// | BOOTSTRAP_ADMIN_EMAIL | - | 启动时创建的管理员邮箱 |
/// | BOOTSTRAP_ADMIN_PASSWORD | - | 启动时创建的管理员密码 |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/tiffin HTTP_PORT=8080 cargo run -p tiffin-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// 变更广播通道容量
    pub channel_capacity: usize,
    pub image_host: ImageHostConfig,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Unsigned-upload image host settings
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub upload_url: Option<String>,
    pub upload_preset: Option<String>,
    pub max_upload_bytes: usize,
}

/// First admin account, created on start-up when missing
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Read and parse an env var, falling back to `default`
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let log_json = env_or("LOG_JSON", environment == "production");

        let bootstrap_admin = match (
            env_opt("BOOTSTRAP_ADMIN_EMAIL"),
            env_opt("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            _ => None,
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./tiffin-data".into()),
            http_port: env_or("HTTP_PORT", 3000),
            jwt: JwtConfig::default(),
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json,
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10_000),
            channel_capacity: env_or("CHANNEL_CAPACITY", 1024),
            image_host: ImageHostConfig {
                upload_url: env_opt("IMAGE_HOST_UPLOAD_URL"),
                upload_preset: env_opt("IMAGE_HOST_UPLOAD_PRESET"),
                max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 5 * 1024 * 1024),
            },
            bootstrap_admin,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("tiffin.redb")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
