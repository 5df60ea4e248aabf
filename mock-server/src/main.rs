use std::collections::HashSet;

use mock_server::{MockConfig, DEFAULT_TOKEN};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("MOCK_ACCESS_TOKEN").unwrap_or_else(|_| DEFAULT_TOKEN.to_string());
    let config = MockConfig {
        tokens: HashSet::from([token]),
        ..MockConfig::default()
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run_with(listener, config).await
}
