use grubdash_hex::application::dish_service::DishService;
use grubdash_hex::application::order_service::OrderService;
use grubdash_hex::config::Config;
use grubdash_hex::inbound::http::{HttpServer, HttpServerConfig};
use grubdash_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for SERVER_HOST / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo: Repo = build_repo();
    let dishes = DishService::new(repo.clone());
    let orders = OrderService::new(repo);
    tracing::debug!(?config, "configuration loaded");

    let server_cfg = HttpServerConfig {
        host: config.server_host.clone(),
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(dishes, orders, server_cfg).await?;
    http.run().await
}
