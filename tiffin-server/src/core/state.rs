use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::message::{ChangeBus, LiveConnections};
use crate::orders::OrderLifecycle;
use crate::services::bootstrap::ensure_bootstrap_admin;
use crate::services::image_host::{self, ImageHost};
use crate::store::DocumentStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | store | redb 文档存储 |
/// | bus | 变更广播总线 |
/// | orders | 预订单生命周期服务 |
/// | jwt_service | JWT 认证服务 |
/// | image_host | 图床上传 |
/// | live_connections | live 连接名额 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: DocumentStore,
    pub bus: ChangeBus,
    pub orders: OrderLifecycle,
    pub jwt_service: Arc<JwtService>,
    pub image_host: Arc<dyn ImageHost>,
    pub live_connections: Arc<LiveConnections>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("live_subscribers", &self.bus.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 由已打开的存储组装状态
    pub fn new(config: Config, store: DocumentStore, image_host: Arc<dyn ImageHost>) -> Self {
        let bus = store.bus().clone();
        let orders = OrderLifecycle::new(store.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config,
            store,
            bus,
            orders,
            jwt_service,
            image_host,
            live_connections: Arc::new(LiveConnections::default()),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/tiffin.redb)
    /// 3. 图床客户端
    /// 4. 首个管理员 (若已配置)
    pub fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let bus = ChangeBus::with_capacity(config.channel_capacity);
        let store = DocumentStore::open(config.database_path(), bus)?;
        tracing::info!(path = %config.database_path().display(), "Document store opened");

        let image_host = image_host::from_config(
            &config.image_host,
            Duration::from_millis(config.request_timeout_ms),
        );

        let state = Self::new(config.clone(), store, image_host);
        state.bootstrap()?;
        Ok(state)
    }

    /// 内存数据库状态，测试用
    pub fn in_memory(config: Config, image_host: Arc<dyn ImageHost>) -> Result<Self> {
        let bus = ChangeBus::with_capacity(config.channel_capacity);
        let store = DocumentStore::open_in_memory(bus)?;
        let state = Self::new(config, store, image_host);
        state.bootstrap()?;
        Ok(state)
    }

    fn bootstrap(&self) -> Result<()> {
        if let Some(admin) = &self.config.bootstrap_admin {
            ensure_bootstrap_admin(&self.store, admin)
                .map_err(|e| ServerError::Internal(anyhow::anyhow!("Bootstrap admin failed: {e}")))?;
        }
        Ok(())
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
