//! Greet Site - a one-route form application.
//!
//! Renders a name form, validates the submission, and greets the user.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::info;

pub mod csrf;
pub mod error;
pub mod form;
pub mod handlers;
pub mod templates;

use csrf::CsrfSigner;

/// Fallback signing secret for local development.
const DEV_SECRET_KEY: &str = "greet-site-dev-secret";

/// Site server configuration.
///
/// Built once at process start and passed into [`router`]; the secret is
/// never read from a global after that.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub port: u16,
    /// Process-wide secret used to sign CSRF tokens.
    pub secret_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            port: 5555,
            secret_key: DEV_SECRET_KEY.to_string(),
        }
    }
}

impl SiteConfig {
    /// Read configuration from the environment.
    ///
    /// `GREET_PORT` overrides the listener port; `GREET_SECRET_KEY` overrides
    /// the CSRF signing secret. Anything unset falls back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("GREET_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let secret_key = std::env::var("GREET_SECRET_KEY").unwrap_or(defaults.secret_key);

        Self { port, secret_key }
    }
}

/// Shared state for all HTTP handlers.
#[derive(Debug, Clone)]
pub struct SiteState {
    /// Signer used to mint and verify CSRF tokens.
    pub csrf: CsrfSigner,
}

/// Build the route table.
///
/// One page route plus a 404 fallback; response tracing and security headers
/// are applied to everything.
pub fn router(config: &SiteConfig) -> Router {
    let state = SiteState {
        csrf: CsrfSigner::new(&config.secret_key),
    };

    Router::new()
        .route("/", get(handlers::home::index).post(handlers::home::submit))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        ))
}

/// Start the site server.
pub async fn run(config: SiteConfig) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let app = router(&config);

    let listener = TcpListener::bind(addr).await?;
    info!("Greet site ready on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.port, 5555);
        assert!(!config.secret_key.is_empty());
    }

    #[test]
    fn test_router_builds() {
        // Router construction must not panic on a default config.
        let _app = router(&SiteConfig::default());
    }
}
