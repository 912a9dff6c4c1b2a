//! Shared test helpers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use shipping_rates::carriers::{OutboundRequest, RequestBody, Transport, TransportError};
use shipping_rates::{Address, Package, Shipment, Weight};

/// Transport that replays canned responses in order and records requests
pub struct MockTransport {
    responses: Mutex<Vec<Result<String, TransportError>>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(MockTransport {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn with_body(body: &str) -> Arc<Self> {
        let mock = Self::new();
        mock.push_body(body);
        mock
    }

    pub fn push_body(&self, body: &str) {
        self.responses.lock().unwrap().push(Ok(body.to_string()));
    }

    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Body of the nth request as text (XML body or the form's XML field)
    pub fn body(&self, index: usize) -> String {
        match &self.requests()[index].body {
            RequestBody::Xml(xml) => xml.clone(),
            RequestBody::Form(fields) => fields
                .iter()
                .find(|(k, _)| k == "XML")
                .map(|(_, v)| v.clone())
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<Bytes, TransportError> {
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(TransportError::Other("no response queued".to_string()));
        }
        responses.remove(0).map(Bytes::from)
    }
}

pub fn us_address(name: &str, city: &str, state: &str, zip: &str) -> Address {
    Address {
        name: name.to_string(),
        street1: "100 Main St".to_string(),
        city: city.to_string(),
        state_province: state.to_string(),
        postal_code: zip.to_string(),
        country: "US".to_string(),
        ..Default::default()
    }
}

pub fn domestic_shipment(packages: Vec<Package>) -> Shipment {
    Shipment::new(
        us_address("Acme Warehouse", "Atlanta", "GA", "30301"),
        us_address("Jane Doe", "Beverly Hills", "CA", "90210"),
        packages,
    )
}

pub fn five_pound_package() -> Package {
    Package::new(Weight::pounds(5.0)).with_packaging("02")
}
