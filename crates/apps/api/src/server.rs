use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::Router;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::database::MovieStore;
use http::{HeaderValue, header};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Binds `api.host:api.port` and serves until the process is stopped.
pub async fn serve(store: Arc<dyn MovieStore>, settings: AppSettings) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;
    let listener = TcpListener::bind(addr).await?;

    serve_with_listener(listener, store, settings).await
}

/// Serves the API on an already bound listener.
pub async fn serve_with_listener(
    listener: TcpListener,
    store: Arc<dyn MovieStore>,
    settings: AppSettings,
) -> Result<()> {
    // --- Server Startup ---
    info!("🚀 Initializing server...");
    let app = create_app(ApiContext { store, settings });

    info!("🐸 Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// The router with CORS, tracing and compression layers applied.
pub fn create_app(api_state: ApiContext) -> Router {
    let cors = cors_layer(&api_state.settings.api.allowed_origins);

    create_router(api_state)
        .layer(TraceLayer::new_for_http().on_request(()))
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Any origin when none are configured, otherwise only the configured ones.
fn cors_layer(configured: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ]);

    if configured.is_empty() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed_origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();
    if allowed_origins.is_empty() {
        warn!("No valid CORS origins configured, cross-origin requests will be rejected");
    }
    layer.allow_origin(allowed_origins)
}
