//! Application wiring: settings, shared state, router, listener.

use crate::bridge::{self, BridgeState};
use crate::config::Settings;
use crate::proxy::{self, Forwarder, ProxyConfig};
use crate::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    router: Router,
}

impl Application {
    pub fn new() -> Result<Self> {
        let settings = Settings::new()?;
        let router = build_router(Arc::new(BridgeState::new()), ProxyConfig::default())?;

        Ok(Self { settings, router })
    }

    pub async fn run(self) -> Result<()> {
        info!("Starting game bridge server on {}", self.settings.listen);

        let listener = tokio::net::TcpListener::bind(self.settings.listen.as_str()).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Assemble the full router: bridge routes plus the independent proxy path,
/// under permissive CORS (the sender runs inside a third-party page) and
/// request tracing.
pub fn build_router(bridge_state: Arc<BridgeState>, proxy_config: ProxyConfig) -> Result<Router> {
    let forwarder = Arc::new(Forwarder::new(proxy_config)?);

    Ok(Router::new()
        .merge(bridge::routes::router(bridge_state))
        .merge(proxy::router(forwarder))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}
