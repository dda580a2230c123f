use super::SubmissionTransport;
use crate::core::{SubmissionPayload, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// `reqwest`-backed transport posting JSON bodies
///
/// The response is dropped unread. A 4xx or 5xx still counts as sent.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Transport without a timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that gives up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Some(timeout),
        }
    }

    /// Reuse an existing connection pool
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn dispatch(
        &self,
        url: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), TransportError> {
        // .json() sets Content-Type: application/json
        let mut request = self.client.post(url).json(payload);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        match request.send().await {
            Ok(_opaque) => {
                tracing::debug!(url, "Payload dispatched");
                Ok(())
            }
            Err(e) if e.is_timeout() => Err(TransportError::TimedOut {
                url: url.to_string(),
            }),
            Err(e) if e.is_builder() => Err(TransportError::InvalidRequest(e.to_string())),
            Err(e) => Err(TransportError::Unreachable {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
