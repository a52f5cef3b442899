use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = kennel_server::config::config().snapshot();
    let ax = kennel_server::build(&config).await?;

    let host = config
        .get_string("http.host")
        .unwrap_or_else(|| "127.0.0.1".to_string());

    let port = config
        .get_string("http.port")
        .unwrap_or_else(|| "8080".to_string());

    let dogs = ax.state.dogs.clone();
    ax.listen(format!("{host}:{port}")).await?;
    dogs.close().await;

    Ok(())
}
