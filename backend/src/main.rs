use credit_backend::chain::AptosClient;
use credit_backend::config::Config;
use credit_backend::routes::{router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("credit_backend=info")),
        )
        .init();

    let config = Config::from_env()?;
    let chain = AptosClient::new(config.node_url.clone());
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        node = %config.node_url,
        contract = %config.contract_address,
        "reading credit and lending state"
    );

    let app = router(AppState::new(config, chain));

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "backend listening");

    axum::serve(listener, app).await?;

    Ok(())
}
