//! Carrier trait definitions
//!
//! This module defines the contract every carrier integration follows.
//! Each carrier (UPS, USPS, FedEx) implements `ShippingCarrier` so callers
//! can rate, shop, and buy labels without knowing the carrier's wire format.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::domain::{Estimate, Provider, PurchasedShipment, Shipment};

use super::http_client::{Transport, TransportError};

// ============================================================================
// Error Types
// ============================================================================

/// Input rejected before any request is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("shipment has no packages")]
    NoPackages,

    #[error("package {index}: weight {weight} {unit} is below the minimum of {min} {unit}")]
    TooLight {
        index: usize,
        weight: f64,
        min: f64,
        unit: &'static str,
    },

    #[error("package {index}: weight {weight} {unit} exceeds the maximum of {max} {unit}")]
    TooHeavy {
        index: usize,
        weight: f64,
        max: f64,
        unit: &'static str,
    },

    #[error("package {index}: {packaging} requires dimensions")]
    MissingDimensions { index: usize, packaging: String },

    #[error("package {index}: {axis} must be greater than zero")]
    NonPositiveDimension { index: usize, axis: &'static str },

    #[error("unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: String },

    #[error("shipper account number is required")]
    MissingShipperNumber,

    #[error("{0} address is missing {1}")]
    MissingAddressField(&'static str, &'static str),

    #[error("{0}")]
    Unsupported(String),
}

/// Failure of a single pipeline stage
#[derive(Debug, Error)]
pub enum CarrierError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("render failed: {0}")]
    Render(String),

    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("carrier rejected request: {code} - {message}")]
    Rejected { code: String, message: String },

    #[error("no applicable service found")]
    EmptyResult,

    #[error("label decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("operation not supported")]
    Unsupported,
}

impl From<quick_xml::DeError> for CarrierError {
    fn from(e: quick_xml::DeError) -> Self {
        CarrierError::Parse(e.to_string())
    }
}

impl From<quick_xml::SeError> for CarrierError {
    fn from(e: quick_xml::SeError) -> Self {
        CarrierError::Render(e.to_string())
    }
}

/// Carrier operation, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Rate,
    Shop,
    ShipConfirm,
    ShipAccept,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Rate => write!(f, "Rate"),
            Operation::Shop => write!(f, "Shop"),
            Operation::ShipConfirm => write!(f, "ShipConfirm"),
            Operation::ShipAccept => write!(f, "ShipAccept"),
        }
    }
}

/// A stage failure tagged with the carrier and operation it came from
#[derive(Debug, Error)]
#[error("{provider} {operation} request failed: {source}")]
pub struct OperationError {
    pub provider: Provider,
    pub operation: Operation,
    #[source]
    pub source: CarrierError,
}

impl OperationError {
    pub fn new(provider: Provider, operation: Operation, source: CarrierError) -> Self {
        OperationError {
            provider,
            operation,
            source,
        }
    }

    /// The underlying stage failure
    pub fn kind(&self) -> &CarrierError {
        &self.source
    }

    /// Whether retrying the same request might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.source, CarrierError::Transport(_))
    }
}

/// Result type for carrier operations
pub type CarrierResult<T> = Result<T, OperationError>;

// ============================================================================
// Request Mode
// ============================================================================

/// Whether a rate request asks for one service or all of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateMode {
    /// Single quote for the selected service
    Rate,
    /// Quotes for every available service
    Shop,
}

impl RateMode {
    pub fn operation(&self) -> Operation {
        match self {
            RateMode::Rate => Operation::Rate,
            RateMode::Shop => Operation::Shop,
        }
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Carrier credentials for authentication
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarrierCredentials {
    /// UPS access license number
    pub access_key: Option<String>,

    /// Account user id (UPS and USPS)
    pub user_id: Option<String>,

    /// Account password (UPS)
    pub password: Option<String>,

    /// UPS shipper account number
    pub shipper_number: Option<String>,
}

impl CarrierCredentials {
    /// Read credentials from environment variables for a specific carrier
    pub fn from_env(provider: Provider) -> Self {
        let prefix = provider.code().to_uppercase();
        let var = |name: &str| {
            std::env::var(format!("{}_{}", prefix, name))
                .ok()
                .filter(|v| !v.trim().is_empty())
        };
        CarrierCredentials {
            access_key: var("ACCESS_LICENSE_NUMBER"),
            user_id: var("USER_ID"),
            password: var("PASSWORD"),
            shipper_number: var("SHIPPER_NUMBER"),
        }
    }

    /// Check whether the carrier has enough to authenticate
    pub fn is_configured(&self, provider: Provider) -> bool {
        match provider {
            Provider::Ups => {
                self.access_key.is_some() && self.user_id.is_some() && self.password.is_some()
            }
            Provider::Usps => self.user_id.is_some(),
            Provider::FedEx => false,
        }
    }

    /// Fill unset fields from another set of credentials
    pub fn or(self, other: CarrierCredentials) -> Self {
        CarrierCredentials {
            access_key: self.access_key.or(other.access_key),
            user_id: self.user_id.or(other.user_id),
            password: self.password.or(other.password),
            shipper_number: self.shipper_number.or(other.shipper_number),
        }
    }
}

// ============================================================================
// Carrier Trait
// ============================================================================

/// Carrier trait for shipping integrations
///
/// Every call runs validate, build, send, parse, and normalize in order.
/// Any stage failure ends the call with an `OperationError`; nothing is
/// retried and no state is kept between calls.
#[async_trait]
pub trait ShippingCarrier: Send + Sync {
    /// Carrier identity attached to every estimate
    fn provider(&self) -> Provider;

    /// Carrier display name
    fn name(&self) -> &'static str {
        match self.provider() {
            Provider::Ups => "UPS",
            Provider::Usps => "USPS",
            Provider::FedEx => "FedEx",
        }
    }

    /// Quote the selected service (or the carrier's ground default)
    async fn rate(&self, shipment: &Shipment) -> CarrierResult<Estimate>;

    /// Quote every service the carrier offers for the shipment
    async fn shop(&self, shipment: &Shipment) -> CarrierResult<Vec<Estimate>>;

    /// Buy labels for the shipment
    async fn purchase(&self, _shipment: &Shipment) -> CarrierResult<PurchasedShipment> {
        Err(OperationError::new(
            self.provider(),
            Operation::ShipConfirm,
            CarrierError::Unsupported,
        ))
    }
}

// ============================================================================
// Carrier Factory
// ============================================================================

/// Carrier factory for creating carrier instances
pub struct CarrierFactory;

impl CarrierFactory {
    /// Create a carrier instance by provider
    ///
    /// Returns None when the provider's credentials are not configured.
    pub fn create(
        provider: Provider,
        settings: &Settings,
        transport: Arc<dyn Transport>,
    ) -> Option<Box<dyn ShippingCarrier>> {
        match provider {
            Provider::Ups => {
                let ups = settings.ups.as_ref()?;
                let credentials = ups.credentials();
                if !credentials.is_configured(Provider::Ups) {
                    return None;
                }
                Some(Box::new(super::ups::UpsCarrier::new(
                    credentials,
                    ups.endpoints(),
                    transport,
                    Arc::new(super::ups::UpsCodeTable::new()),
                )))
            }
            Provider::Usps => {
                let usps = settings.usps.as_ref()?;
                let credentials = usps.credentials();
                if !credentials.is_configured(Provider::Usps) {
                    return None;
                }
                Some(Box::new(super::usps::UspsCarrier::new(
                    credentials,
                    usps.url.clone(),
                    transport,
                    Arc::new(super::usps::UspsCodeTable::new()),
                )))
            }
            Provider::FedEx => {
                if settings.fedex_enabled {
                    Some(Box::new(super::fedex::FedExCarrier::new()))
                } else {
                    None
                }
            }
        }
    }

    /// Create every carrier that has credentials configured
    pub fn from_settings(
        settings: &Settings,
        transport: Arc<dyn Transport>,
    ) -> Vec<Box<dyn ShippingCarrier>> {
        let mut carriers = Vec::new();

        for provider in Provider::ALL {
            if let Some(carrier) = Self::create(provider, settings, transport.clone()) {
                info!(provider = %provider, "Carrier configured");
                carriers.push(carrier);
            }
        }

        carriers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_default() {
        let creds = CarrierCredentials::default();
        assert!(!creds.is_configured(Provider::Ups));
        assert!(!creds.is_configured(Provider::Usps));
    }

    #[test]
    fn test_usps_needs_only_user_id() {
        let creds = CarrierCredentials {
            user_id: Some("123ABC".to_string()),
            ..Default::default()
        };
        assert!(creds.is_configured(Provider::Usps));
        assert!(!creds.is_configured(Provider::Ups));
    }

    #[test]
    fn test_credentials_or_keeps_explicit_values() {
        let explicit = CarrierCredentials {
            user_id: Some("file".to_string()),
            ..Default::default()
        };
        let env = CarrierCredentials {
            user_id: Some("env".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };

        let merged = explicit.or(env);
        assert_eq!(merged.user_id.as_deref(), Some("file"));
        assert_eq!(merged.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_operation_error_message() {
        let err = OperationError::new(Provider::Ups, Operation::Rate, CarrierError::EmptyResult);
        assert_eq!(
            err.to_string(),
            "UPS Rate request failed: no applicable service found"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transport_errors_are_retryable() {
        let err = OperationError::new(
            Provider::Usps,
            Operation::Shop,
            CarrierError::Transport(TransportError::EmptyBody),
        );
        assert!(err.is_retryable());
    }
}
