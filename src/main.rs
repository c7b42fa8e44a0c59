use anyhow::Context;
use tron_adapter::config::AppConfig;
use tron_adapter::log_info;
use tron_adapter::startup::Application;
use tron_adapter::utils::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 初始化日志（全局只需调用一次）
    init_logger();

    log_info!("Starting application initialization...");

    let config = AppConfig::load().context("Failed to load application configuration")?;

    let application = Application::build(config)
        .await
        .context("Application building failed (adapter configuration)")?;

    log_info!("Application build complete. Starting scan loop.");

    application
        .run()
        .await
        .context("Application core service failed during runtime")?;

    Ok(())
}
