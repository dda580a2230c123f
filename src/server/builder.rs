//! SiteBuilder for fluent API to build the HTTP server

use super::handlers::AppState;
use super::router::build_site_routes;
use crate::client::{SubmissionClient, SubmissionTransport};
use crate::config::SiteConfig;
use crate::core::NotificationBus;
use crate::render::PageRenderer;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the lead-capture site
///
/// # Example
///
/// ```ignore
/// let config = SiteConfig::from_yaml_file("site.yaml")?;
/// SiteBuilder::new(config)
///     .serve()
///     .await?;
/// ```
pub struct SiteBuilder {
    config: SiteConfig,
    client: Option<SubmissionClient>,
    notifications: NotificationBus,
    custom_routes: Vec<Router>,
}

impl SiteBuilder {
    pub fn new(config: SiteConfig) -> Self {
        let notifications = NotificationBus::new(config.notifications.capacity);
        Self {
            config,
            client: None,
            notifications,
            custom_routes: Vec::new(),
        }
    }

    /// Send submissions through `transport` instead of HTTP
    ///
    /// Endpoints still come from the configuration.
    pub fn with_transport(mut self, transport: impl SubmissionTransport + 'static) -> Self {
        self.client = Some(SubmissionClient::new(
            self.config.endpoints.clone(),
            transport,
        ));
        self
    }

    /// Merge extra routes into the site
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Bus the site's form controllers publish on
    ///
    /// Subscribe before serving to see every notification.
    pub fn notifications(&self) -> &NotificationBus {
        &self.notifications
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Build the router
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;

        let client = self
            .client
            .unwrap_or_else(|| SubmissionClient::from_config(&self.config));
        let state = AppState {
            renderer: Arc::new(PageRenderer::new()?),
            client,
            notifications: self.notifications,
        };

        let mut app = build_site_routes(state);
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the site with graceful shutdown
    ///
    /// Binds to `server.bind` and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        assert!(SiteBuilder::default().build().is_ok());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = SiteConfig::default();
        config.endpoints.buyer = "not a url".to_string();
        assert!(SiteBuilder::new(config).build().is_err());
    }

    #[test]
    fn test_notification_bus_uses_configured_capacity() {
        let builder = SiteBuilder::default();
        let _rx = builder.notifications().subscribe();
        assert_eq!(builder.notifications().receiver_count(), 1);
    }
}
