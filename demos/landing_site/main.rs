//! Serves the BlueCycle site
//!
//! ```text
//! cargo run --example landing_site -- [path/to/site.yaml]
//! ```

use bluecycle::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "Loading site configuration");
            SiteConfig::from_yaml_file(&path)?
        }
        None => SiteConfig::default(),
    };

    let site = SiteBuilder::new(config);

    let mut notifications = site.notifications().subscribe();
    tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(envelope) => {
                    let n = &envelope.notification;
                    if n.is_destructive() {
                        tracing::warn!(role = %envelope.role, title = %n.title, "{}", n.description);
                    } else {
                        tracing::info!(role = %envelope.role, title = %n.title, "{}", n.description);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification log lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    site.serve().await
}
