//! Configuration loading and management
//!
//! Every section is optional; an empty document yields the production
//! defaults.
//!
//! ```yaml
//! server:
//!   bind: 0.0.0.0:8080
//! endpoints:
//!   buyer: https://script.google.com/macros/s/.../exec
//!   seller: https://script.google.com/macros/s/.../exec
//! submission:
//!   timeout_secs: 15
//! notifications:
//!   capacity: 64
//! ```

use crate::core::{ConfigError, Role};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Lead sheet receiving purchase requests
pub const DEFAULT_BUYER_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbzJkvI57RBhg87xDDWM8nfRH0qHtdir4wAZAFx50hWjV0YPb1MLYEKGHehqgkuioQY8ig/exec";

/// Lead sheet receiving supply offers
pub const DEFAULT_SELLER_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbxEi8rUjpLxd5O30DJRJwUoyJviCoeU7QvfcU_S5Nuoed1tP0NNy6Iqp4ui6xJ8c2qLIw/exec";

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Destination URL per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub buyer: String,
    pub seller: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            buyer: DEFAULT_BUYER_ENDPOINT.to_string(),
            seller: DEFAULT_SELLER_ENDPOINT.to_string(),
        }
    }
}

impl EndpointsConfig {
    /// URL that receives submissions for `role`
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Buyer => &self.buyer,
            Role::Seller => &self.seller,
        }
    }
}

/// Outbound submission settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Give up on a dispatch after this many seconds; unbounded when unset
    pub timeout_secs: Option<u64>,
}

/// Notification bus settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Buffered notifications per subscriber before it lags
    pub capacity: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Complete site configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub endpoints: EndpointsConfig,
    pub submission: SubmissionConfig,
    pub notifications: NotificationsConfig,
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// The result is checked with [`validate`](Self::validate).
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // serde_yaml reads an empty document as unit, not an empty map
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in Role::ALL {
            check_endpoint(role, self.endpoints.for_role(role))?;
        }
        if self.endpoints.buyer == self.endpoints.seller {
            return Err(ConfigError::SharedEndpoint(self.endpoints.buyer.clone()));
        }
        self.bind_addr()?;
        if self.notifications.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Parsed listener address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.server.bind.clone()))
    }

    /// Dispatch timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.submission.timeout_secs.map(Duration::from_secs)
    }
}

fn check_endpoint(role: Role, url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        role: role.to_string(),
        url: url.to_string(),
        reason,
    };

    let parsed = reqwest::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
