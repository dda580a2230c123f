//! Submission client for the lead endpoints
//!
//! The lead sheets answer without CORS headers, so a browser only ever sees
//! an opaque response. The client keeps that contract on the server side too:
//! it reports whether the request left, never what the remote made of it.

mod http;

pub use http::HttpTransport;

use crate::config::{EndpointsConfig, SiteConfig};
use crate::core::{Role, SubmissionPayload, TransportError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of handing a payload to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Dispatched without a transport error; remote acceptance is unknown
    Sent,
    /// Could not be dispatched
    TransportFailed,
}

/// One-way delivery of a payload to a URL
///
/// Implementations must not report remote status: `Ok(())` means the
/// request was sent.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn dispatch(&self, url: &str, payload: &SubmissionPayload)
    -> Result<(), TransportError>;
}

/// Sends payloads to the endpoint configured for their role
#[derive(Clone)]
pub struct SubmissionClient {
    endpoints: EndpointsConfig,
    transport: Arc<dyn SubmissionTransport>,
}

impl SubmissionClient {
    pub fn new(endpoints: EndpointsConfig, transport: impl SubmissionTransport + 'static) -> Self {
        Self {
            endpoints,
            transport: Arc::new(transport),
        }
    }

    /// HTTP client honouring the configured endpoints and timeout
    pub fn from_config(config: &SiteConfig) -> Self {
        let transport = match config.timeout() {
            Some(timeout) => HttpTransport::with_timeout(timeout),
            None => HttpTransport::new(),
        };
        Self::new(config.endpoints.clone(), transport)
    }

    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.endpoints
    }

    /// Post `payload` to the endpoint for `role`
    pub async fn submit(&self, payload: &SubmissionPayload, role: Role) -> Outcome {
        let url = self.endpoints.for_role(role);
        match self.transport.dispatch(url, payload).await {
            Ok(()) => {
                tracing::info!(role = %role, "Lead submission dispatched");
                Outcome::Sent
            }
            Err(e) => {
                tracing::error!(role = %role, error = %e, "Lead submission failed");
                Outcome::TransportFailed
            }
        }
    }
}

impl std::fmt::Debug for SubmissionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        urls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl SubmissionTransport for Arc<Recorder> {
        async fn dispatch(
            &self,
            url: &str,
            _payload: &SubmissionPayload,
        ) -> Result<(), TransportError> {
            self.urls.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(TransportError::Unreachable {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn payload(role: Role) -> SubmissionPayload {
        SubmissionPayload {
            role,
            name: "A".to_string(),
            phone: "9876543210".to_string(),
            email: String::new(),
            societyname: String::new(),
            quantity: "500".to_string(),
            address: "Addr".to_string(),
            pincode: "560001".to_string(),
            delivery_date: None,
        }
    }

    fn endpoints() -> EndpointsConfig {
        EndpointsConfig {
            buyer: "http://leads.test/buyer".to_string(),
            seller: "http://leads.test/seller".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_routes_by_role() {
        let recorder = Arc::new(Recorder::default());
        let client = SubmissionClient::new(endpoints(), recorder.clone());

        assert_eq!(client.submit(&payload(Role::Seller), Role::Seller).await, Outcome::Sent);
        assert_eq!(client.submit(&payload(Role::Buyer), Role::Buyer).await, Outcome::Sent);

        let urls = recorder.urls.lock().unwrap();
        assert_eq!(
            *urls,
            vec!["http://leads.test/seller", "http://leads.test/buyer"]
        );
    }

    #[tokio::test]
    async fn test_transport_error_becomes_transport_failed() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Default::default()
        });
        let client = SubmissionClient::new(endpoints(), recorder);

        assert_eq!(
            client.submit(&payload(Role::Buyer), Role::Buyer).await,
            Outcome::TransportFailed
        );
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(serde_json::to_value(Outcome::Sent).unwrap(), "sent");
        assert_eq!(
            serde_json::to_value(Outcome::TransportFailed).unwrap(),
            "transport_failed"
        );
    }
}
