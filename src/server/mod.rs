//! HTTP surface: health check and the analysis endpoint

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

use crate::config::ServerConfig;
use crate::error::{Result, SkillGapError};
use crate::processing::analyzer::GapAnalyzer;
use axum::{
    http::{request::Parts, HeaderValue},
    routing::{get, post},
    Router,
};
use regex::Regex;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .with_state(state)
}

/// CORS policy from configuration. A configured origin regex takes precedence
/// over the origin list; `*` in the list mirrors any origin.
pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let allow_origin = match config.cors_allowed_origin_regex.as_deref() {
        Some(pattern) => {
            let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
                SkillGapError::Configuration(format!("Invalid CORS origin regex: {}", e))
            })?;
            AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().map(|o| regex.is_match(o)).unwrap_or(false)
            })
        }
        None if config.cors_allowed_origins.iter().any(|o| o == "*") => AllowOrigin::mirror_request(),
        None => {
            let origins = config
                .cors_allowed_origins
                .iter()
                .map(|origin| {
                    origin.parse::<HeaderValue>().map_err(|e| {
                        SkillGapError::Configuration(format!("Invalid CORS origin '{}': {}", origin, e))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            AllowOrigin::list(origins)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Full application: routes, shared state and CORS.
pub fn app(config: &ServerConfig, analyzer: Arc<GapAnalyzer>) -> Result<Router> {
    Ok(build_router(AppState::new(analyzer)).layer(cors_layer(config)?))
}

pub async fn serve(config: &ServerConfig, analyzer: Arc<GapAnalyzer>) -> Result<()> {
    let app = app(config, analyzer)?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| SkillGapError::Configuration(format!("Invalid listen address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SkillGapError::Server(e.to_string()))
}
