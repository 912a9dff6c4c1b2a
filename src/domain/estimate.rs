//! Normalized carrier output
//!
//! Every carrier's response is mapped into these shapes so callers can
//! compare quotes without knowing where they came from.

use serde::{Deserialize, Serialize};

/// Carrier identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "USPS")]
    Usps,
    #[serde(rename = "FedEx")]
    FedEx,
}

impl Provider {
    /// All known carriers
    pub const ALL: [Provider; 3] = [Provider::Ups, Provider::Usps, Provider::FedEx];

    /// Short lowercase code used in config and CLI arguments
    pub fn code(&self) -> &'static str {
        match self {
            Provider::Ups => "ups",
            Provider::Usps => "usps",
            Provider::FedEx => "fedex",
        }
    }

    /// Parse a provider from its code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        Provider::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Ups => write!(f, "UPS"),
            Provider::Usps => write!(f, "USPS"),
            Provider::FedEx => write!(f, "FedEx"),
        }
    }
}

/// Price quote for one service option
///
/// Only carrier normalizers build estimates; prices are never negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    name: String,
    provider: Provider,
    service: String,
    price: f64,
}

impl Estimate {
    pub(crate) fn new(name: String, provider: Provider, service: String, price: f64) -> Self {
        debug_assert!(price >= 0.0);
        Estimate {
            name,
            provider,
            service,
            price,
        }
    }

    /// Human-readable service description (empty when the code is unknown)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Carrier service code
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Total charge in the carrier's currency (USD)
    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Printable label for one package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub tracking_number: String,
    /// Image format code reported by the carrier (e.g., "GIF")
    pub format: String,
    #[serde(skip)]
    pub image: Vec<u8>,
}

/// Result of buying labels for a shipment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchasedShipment {
    pub provider: Provider,
    pub identification_number: String,
    pub total_charges: f64,
    pub labels: Vec<Label>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_codes() {
        assert_eq!(Provider::from_code("UPS"), Some(Provider::Ups));
        assert_eq!(Provider::from_code(" usps "), Some(Provider::Usps));
        assert_eq!(Provider::from_code("dhl"), None);
        assert_eq!(Provider::FedEx.to_string(), "FedEx");
    }

    #[test]
    fn test_estimate_serializes_provider_name() {
        let estimate = Estimate::new("Ground".to_string(), Provider::Ups, "03".to_string(), 8.5);
        let json = serde_json::to_value(&estimate).unwrap();

        assert_eq!(json["provider"], "UPS");
        assert_eq!(json["service"], "03");
        assert_eq!(json["price"], 8.5);
    }
}
