//! USPS API Client Implementation
//!
//! Implements `ShippingCarrier` for the USPS Web Tools RateV4 API. The XML
//! request travels as the `XML` field of a form post with `API=RateV4`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, trace};

use crate::carriers::http_client::{OutboundRequest, Transport};
use crate::carriers::traits::{
    CarrierCredentials, CarrierError, CarrierResult, Operation, OperationError, RateMode,
    ShippingCarrier,
};
use crate::carriers::xml;
use crate::domain::{Estimate, Provider, Shipment};

use super::codes::UspsCodeTable;
use super::mapper::UspsMapper;
use super::models::{RateV4Response, UspsError};
use super::validate::validate_shipment;

/// Production Web Tools endpoint
pub const DEFAULT_URL: &str = "https://secure.shippingapis.com/ShippingAPI.dll";

const API_NAME: &str = "RateV4";

/// USPS API client
pub struct UspsCarrier {
    credentials: CarrierCredentials,
    url: String,
    transport: Arc<dyn Transport>,
    codes: Arc<UspsCodeTable>,
}

impl UspsCarrier {
    /// Create a new USPS carrier instance
    pub fn new(
        credentials: CarrierCredentials,
        url: String,
        transport: Arc<dyn Transport>,
        codes: Arc<UspsCodeTable>,
    ) -> Self {
        UspsCarrier {
            credentials,
            url,
            transport,
            codes,
        }
    }

    async fn request_estimates(
        &self,
        shipment: &Shipment,
        mode: RateMode,
    ) -> Result<Vec<Estimate>, CarrierError> {
        let validated = validate_shipment(shipment)?;

        let request = UspsMapper::rate_request(&validated, &self.credentials, mode);
        let body = xml::render("RateV4Request", &request)?;
        trace!(body = %body, "USPS request");

        let form = vec![
            ("API".to_string(), API_NAME.to_string()),
            ("XML".to_string(), body),
        ];
        let raw = self.transport.send(OutboundRequest::form(&self.url, form)).await?;
        debug!(bytes = raw.len(), "USPS response received");

        if xml::root_name(&raw)? == "Error" {
            let error: UspsError = xml::parse_any(&raw)?;
            return Err(UspsMapper::rejected(error));
        }
        let response: RateV4Response = xml::parse("RateV4Response", &raw)?;

        let estimates = UspsMapper::estimates(response, &self.codes)?;
        info!(estimates = estimates.len(), "USPS rating complete");
        Ok(estimates)
    }
}

#[async_trait]
impl ShippingCarrier for UspsCarrier {
    fn provider(&self) -> Provider {
        Provider::Usps
    }

    #[instrument(skip(self, shipment), fields(provider = "USPS"))]
    async fn rate(&self, shipment: &Shipment) -> CarrierResult<Estimate> {
        let result = self
            .request_estimates(shipment, RateMode::Rate)
            .await
            .and_then(|estimates| estimates.into_iter().next().ok_or(CarrierError::EmptyResult));

        result.map_err(|e| OperationError::new(Provider::Usps, Operation::Rate, e))
    }

    #[instrument(skip(self, shipment), fields(provider = "USPS"))]
    async fn shop(&self, shipment: &Shipment) -> CarrierResult<Vec<Estimate>> {
        self.request_estimates(shipment, RateMode::Shop)
            .await
            .map_err(|e| OperationError::new(Provider::Usps, Operation::Shop, e))
    }
}
