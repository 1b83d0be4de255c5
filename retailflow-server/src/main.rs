//! RetailFlow Transfer API entry point.

use tracing::info;

use retailflow_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting RetailFlow Transfer API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(5000);

    let state = AppState::new();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
