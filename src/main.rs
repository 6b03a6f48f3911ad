use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use memora_control_plane::config::Config;
use memora_control_plane::routes;
use memora_control_plane::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "memora_control_plane=debug,tower_http=info".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    info!("dataplane API at {}", config.dataplane_api_url);

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config);

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("control plane listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
