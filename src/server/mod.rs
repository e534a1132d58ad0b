pub mod api;
pub mod dtos;
pub mod error;
pub mod extractors;
pub mod models;
pub mod services;
pub mod utils;

use std::{net::SocketAddr, sync::Arc, time::Instant};

use anyhow::Context;
use axum::{Extension, Router, http::HeaderValue, routing::get};
use once_cell::sync::Lazy;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::AppConfig;
use api::{addon_controller::AddonController, health_controller::health_endpoint};
use services::app_services::AppServices;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

pub fn get_app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn get_uptime_seconds() -> u64 {
    START_TIME.elapsed().as_secs()
}

pub struct ApplicationServer;

impl ApplicationServer {
    pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
        Lazy::force(&START_TIME);

        let services = AppServices::new(config.clone());
        let app = Self::router(services);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind port {}", config.port))?;

        info!("addon running at http://localhost:{}", config.port);

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .context("error while serving")?;

        info!("server shut down");
        Ok(())
    }

    /// all routes with services and layers attached, also what the integration tests drive
    pub fn router(services: AppServices) -> Router {
        let cors = Self::cors_layer(&services.config.cors_origin);

        Router::new()
            .route("/health", get(health_endpoint))
            .merge(AddonController::app())
            .layer(Extension(services))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    fn cors_layer(cors_origin: &str) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        if cors_origin.trim() == "*" {
            return layer.allow_origin(Any);
        }

        let origins: Vec<HeaderValue> = cors_origin
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("ignoring unparsable cors origin {}", o);
                    None
                }
            })
            .collect();

        layer.allow_origin(AllowOrigin::list(origins))
    }

    async fn shutdown_signal() {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("couldn't listen for ctrl-c: {}", e);
            // never resolve, the server keeps running until killed
            std::future::pending::<()>().await;
        }
        info!("ctrl-c received, shutting down...");
    }
}
