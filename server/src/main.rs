#![recursion_limit = "256"]

mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::HostConfig::from_env()?;
    let state = state::AppState::new(&config)?;
    tracing::info!(upstream = %config.api_upstream_url, timeout_secs = config.upstream_timeout.as_secs(), "api forwarding configured");

    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, "tokenlab listening");
    axum::serve(listener, app).await?;
    Ok(())
}
