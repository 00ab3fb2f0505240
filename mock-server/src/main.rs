use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = MockConfig::default();
    if let Ok(app_id) = std::env::var("HOCKEYAPP_APP_ID") {
        config.app_id = app_id;
    }
    if let Ok(api_token) = std::env::var("HOCKEYAPP_API_TOKEN") {
        config.api_token = api_token;
    }
    if let Ok(secret) = std::env::var("HOCKEYAPP_SECRET") {
        config.secret = secret;
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, app_id = %config.app_id, "mock HockeyApp listening");
    mock_server::run(listener, config).await
}
