//! Greet site server binary.

use anyhow::Result;
use greet_site::SiteConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("greet_site=info,tower_http=info")),
        )
        .init();

    greet_site::run(SiteConfig::from_env()).await
}
