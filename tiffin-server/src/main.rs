use tiffin_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    // 3. 日志
    let log_dir = config.log_dir();
    init_logger_with_file(&config.log_level, config.log_json, log_dir.to_str())?;

    print_banner();
    tracing::info!(environment = %config.environment, work_dir = %config.work_dir, "Tiffin server starting...");

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config)?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
