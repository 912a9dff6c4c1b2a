//! HTTP transport for carrier XML APIs
//!
//! The `Transport` trait is the only network boundary the carriers see:
//! one request in, the raw response body out. `HttpTransport` is the
//! reqwest-backed implementation. It makes exactly one attempt per call;
//! deadlines come from the client timeouts.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::HttpSettings;

/// Transport failures are opaque to the carriers
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty response body")]
    EmptyBody,

    #[error("{0}")]
    Other(String),
}

/// Request body as the carrier expects it
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Raw XML document(s)
    Xml(String),
    /// URL-encoded form fields
    Form(Vec<(String, String)>),
}

impl RequestBody {
    pub fn len(&self) -> usize {
        match self {
            RequestBody::Xml(xml) => xml.len(),
            RequestBody::Form(fields) => fields.iter().map(|(k, v)| k.len() + v.len() + 2).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outbound carrier request
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: RequestBody,
}

impl OutboundRequest {
    /// POST raw XML
    pub fn xml(url: impl Into<String>, body: String) -> Self {
        OutboundRequest {
            url: url.into(),
            headers: vec![("Content-Type", "application/xml; charset=utf-8".to_string())],
            body: RequestBody::Xml(body),
        }
    }

    /// POST a URL-encoded form
    pub fn form(url: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        OutboundRequest {
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Form(fields),
        }
    }

    /// Add a header to the request
    pub fn header(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((key, value.into()));
        self
    }
}

/// Network boundary used by every carrier
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request once and return the response body
    async fn send(&self, request: OutboundRequest) -> Result<Bytes, TransportError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport from HTTP settings
    pub fn new(settings: &HttpSettings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(HttpTransport { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        HttpTransport { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<Bytes, TransportError> {
        debug!(url = %request.url, bytes = request.body.len(), "Sending carrier request");

        let mut builder = self.client.post(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(*key, value.as_str());
        }
        builder = match request.body {
            RequestBody::Xml(xml) => builder.body(xml),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Carrier returned error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let body = response.bytes().await?;
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(TransportError::EmptyBody);
        }

        trace!(body = %String::from_utf8_lossy(&body), "Carrier response");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new(&HttpSettings::default());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_xml_request_sets_content_type() {
        let request = OutboundRequest::xml("https://example.test/Rate", "<a/>".to_string())
            .header("SOAPAction", "Rate");

        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers[0].0, "Content-Type");
        assert_eq!(request.body.len(), 4);
    }

    #[test]
    fn test_form_body_length() {
        let body = RequestBody::Form(vec![("API".to_string(), "RateV4".to_string())]);
        assert!(!body.is_empty());
    }
}
