//! UPS API Client Implementation
//!
//! Implements `ShippingCarrier` for the UPS XML API (Rate, ShipConfirm,
//! ShipAccept). Every request is an AccessRequest document followed by the
//! service request document, posted to the service endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::carriers::http_client::{OutboundRequest, Transport};
use crate::carriers::traits::{
    CarrierCredentials, CarrierError, CarrierResult, Operation, OperationError, RateMode,
    ShippingCarrier,
};
use crate::carriers::xml;
use crate::domain::{Estimate, Provider, PurchasedShipment, Shipment};

use super::codes::UpsCodeTable;
use super::mapper::UpsMapper;
use super::models::*;
use super::validate::validate_shipment;

/// UPS service endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct UpsEndpoints {
    pub rate: String,
    pub ship_confirm: String,
    pub ship_accept: String,
}

impl UpsEndpoints {
    /// UPS customer integration environment
    pub fn testing() -> Self {
        UpsEndpoints {
            rate: "https://wwwcie.ups.com/ups.app/xml/Rate".to_string(),
            ship_confirm: "https://wwwcie.ups.com/ups.app/xml/ShipConfirm".to_string(),
            ship_accept: "https://wwwcie.ups.com/ups.app/xml/ShipAccept".to_string(),
        }
    }
}

impl Default for UpsEndpoints {
    fn default() -> Self {
        Self::testing()
    }
}

/// UPS API client
pub struct UpsCarrier {
    credentials: CarrierCredentials,
    endpoints: UpsEndpoints,
    transport: Arc<dyn Transport>,
    codes: Arc<UpsCodeTable>,
}

impl UpsCarrier {
    /// Create a new UPS carrier instance
    pub fn new(
        credentials: CarrierCredentials,
        endpoints: UpsEndpoints,
        transport: Arc<dyn Transport>,
        codes: Arc<UpsCodeTable>,
    ) -> Self {
        UpsCarrier {
            credentials,
            endpoints,
            transport,
            codes,
        }
    }

    /// AccessRequest followed by the service request, as one body
    fn envelope<T: Serialize>(&self, root: &str, request: &T) -> Result<String, CarrierError> {
        let access = xml::render("AccessRequest", &UpsMapper::access_request(&self.credentials))?;
        let body = xml::render(root, request)?;
        Ok(format!("{}{}", access, body))
    }

    /// Send one request and return the raw response
    async fn send(
        &self,
        url: &str,
        action: &'static str,
        body: String,
    ) -> Result<bytes::Bytes, CarrierError> {
        trace!(body = %body, "UPS request");
        let request = OutboundRequest::xml(url, body).header("SOAPAction", action);
        let response = self.transport.send(request).await?;
        debug!(bytes = response.len(), "UPS response received");
        Ok(response)
    }

    async fn request_estimates(
        &self,
        shipment: &Shipment,
        mode: RateMode,
    ) -> Result<Vec<Estimate>, CarrierError> {
        let validated = validate_shipment(shipment)?;

        let context = Uuid::new_v4().to_string();
        let request =
            UpsMapper::rate_request(&validated, &self.credentials, mode, &self.codes, &context);
        let body = self.envelope("RatingServiceSelectionRequest", &request)?;

        let raw = self.send(&self.endpoints.rate, "Rate", body).await?;
        let response: RatingServiceSelectionResponse =
            xml::parse("RatingServiceSelectionResponse", &raw)?;

        let estimates = UpsMapper::estimates(response, &self.codes)?;
        info!(customer_context = %context, estimates = estimates.len(), "UPS rating complete");
        Ok(estimates)
    }

    /// Validate the shipment with UPS and get a digest to accept
    #[instrument(skip(self, shipment), fields(provider = "UPS"))]
    pub async fn confirm(&self, shipment: &Shipment) -> CarrierResult<String> {
        self.confirm_inner(shipment)
            .await
            .map_err(|e| OperationError::new(Provider::Ups, Operation::ShipConfirm, e))
    }

    async fn confirm_inner(&self, shipment: &Shipment) -> Result<String, CarrierError> {
        let validated = validate_shipment(shipment)?;

        let context = Uuid::new_v4().to_string();
        let request =
            UpsMapper::confirm_request(&validated, &self.credentials, &self.codes, &context)?;
        let body = self.envelope("ShipmentConfirmRequest", &request)?;

        let raw = self.send(&self.endpoints.ship_confirm, "ShipConfirm", body).await?;
        let response: ShipmentConfirmResponse = xml::parse("ShipmentConfirmResponse", &raw)?;

        UpsMapper::confirmed_digest(response)
    }

    /// Accept a confirmed shipment and decode its labels
    #[instrument(skip(self, digest), fields(provider = "UPS"))]
    pub async fn accept(&self, digest: &str) -> CarrierResult<PurchasedShipment> {
        self.accept_inner(digest)
            .await
            .map_err(|e| OperationError::new(Provider::Ups, Operation::ShipAccept, e))
    }

    async fn accept_inner(&self, digest: &str) -> Result<PurchasedShipment, CarrierError> {
        let context = Uuid::new_v4().to_string();
        let request = UpsMapper::accept_request(digest, &context);
        let body = self.envelope("ShipmentAcceptRequest", &request)?;

        let raw = self.send(&self.endpoints.ship_accept, "ShipAccept", body).await?;
        let response: ShipmentAcceptResponse = xml::parse("ShipmentAcceptResponse", &raw)?;

        UpsMapper::purchased(response)
    }
}

#[async_trait]
impl ShippingCarrier for UpsCarrier {
    fn provider(&self) -> Provider {
        Provider::Ups
    }

    #[instrument(skip(self, shipment), fields(provider = "UPS"))]
    async fn rate(&self, shipment: &Shipment) -> CarrierResult<Estimate> {
        let result = self
            .request_estimates(shipment, RateMode::Rate)
            .await
            .and_then(|estimates| estimates.into_iter().next().ok_or(CarrierError::EmptyResult));

        result.map_err(|e| OperationError::new(Provider::Ups, Operation::Rate, e))
    }

    #[instrument(skip(self, shipment), fields(provider = "UPS"))]
    async fn shop(&self, shipment: &Shipment) -> CarrierResult<Vec<Estimate>> {
        self.request_estimates(shipment, RateMode::Shop)
            .await
            .map_err(|e| OperationError::new(Provider::Ups, Operation::Shop, e))
    }

    #[instrument(skip(self, shipment), fields(provider = "UPS"))]
    async fn purchase(&self, shipment: &Shipment) -> CarrierResult<PurchasedShipment> {
        let digest = self.confirm(shipment).await?;
        let purchased = self.accept(&digest).await?;
        info!(
            identification_number = %purchased.identification_number,
            labels = purchased.labels.len(),
            "UPS labels purchased"
        );
        Ok(purchased)
    }
}
