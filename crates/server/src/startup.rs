use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use configs::{AppConfig, ServerConfig};
use service::storage::Storage;

use crate::{errors::StartupError, metrics::Metrics, routes, state::ServerState};

/// Credentialed CORS for the configured origins only; none configured means same-origin.
fn build_cors(cfg: &ServerConfig) -> Result<CorsLayer, StartupError> {
    let origins = cfg
        .cors_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| StartupError::InvalidConfig(format!("cors origin {o}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if origins.is_empty() {
        return Ok(CorsLayer::new());
    }
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Storage-backed application router.
pub fn build_app(storage: &Storage, cfg: &AppConfig) -> Result<Router, StartupError> {
    let metrics = Metrics::new().map_err(|e| StartupError::InvalidConfig(format!("metrics: {e}")))?;
    let auth = ServerState::configured_authenticator(&cfg.auth);
    let state = ServerState::new(storage, auth, Arc::new(metrics));
    Ok(routes::build_router(state, build_cors(&cfg.server)?))
}

/// Open storage, serve until `shutdown` resolves, then release storage.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if cfg.auth.uses_default_secret() {
        warn!("JWT_SECRET not set; using the development secret");
    }
    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;

    let storage = Storage::open(&cfg.database).await?;
    info!(backend = storage.backend_name(), "storage ready");
    let app = build_app(&storage, &cfg)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Any(anyhow::anyhow!("bind {addr}: {e}")))?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Any(e.into()))?;

    info!("http server drained");
    storage.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_rejects_unparseable_origin() {
        let cfg = ServerConfig { cors_origins: vec!["http://ok.example\n".into()], ..Default::default() };
        assert!(matches!(build_cors(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn cors_accepts_configured_origins() {
        let cfg = ServerConfig { cors_origins: vec!["http://localhost:3000".into()], ..Default::default() };
        assert!(build_cors(&cfg).is_ok());
        assert!(build_cors(&ServerConfig::default()).is_ok());
    }
}
