//! Carrier-agnostic shipment description
//!
//! Callers describe what they are sending with these types. Each carrier
//! module validates them against its own limits and translates them into
//! its wire format.

use serde::{Deserialize, Serialize};

// ============================================================================
// Address
// ============================================================================

/// Postal address for shipper, recipient, or origin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub name: String,
    pub company: String,
    pub street1: String,
    pub street2: Option<String>,
    pub street3: Option<String>,
    pub city: String,
    pub state_province: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code (e.g., "US", "GB")
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub residential: bool,
}

impl Address {
    /// Name to print on the label: company if present, otherwise the person
    pub fn display_name(&self) -> &str {
        if self.company.trim().is_empty() {
            &self.name
        } else {
            &self.company
        }
    }

    /// Five digit ZIP code, if the postal code starts with one
    pub fn zip5(&self) -> Option<&str> {
        let zip = self.postal_code.trim();
        let head = zip.get(..5)?;
        if head.chars().all(|c| c.is_ascii_digit()) {
            Some(head)
        } else {
            None
        }
    }

    /// Whether the address lies in the given country (case-insensitive)
    pub fn is_in(&self, country: &str) -> bool {
        self.country.trim().eq_ignore_ascii_case(country)
    }
}

// ============================================================================
// Weight & Dimensions
// ============================================================================

const OUNCES_PER_POUND: f64 = 16.0;

/// Package weight
///
/// Stored in ounces; UPS reads pounds and USPS reads ounces.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Weight {
    ounces: f64,
}

impl Weight {
    pub fn ounces(ounces: f64) -> Self {
        Weight { ounces }
    }

    pub fn pounds(pounds: f64) -> Self {
        Weight {
            ounces: pounds * OUNCES_PER_POUND,
        }
    }

    pub fn as_ounces(&self) -> f64 {
        self.ounces
    }

    pub fn as_pounds(&self) -> f64 {
        self.ounces / OUNCES_PER_POUND
    }
}

/// Package dimensions in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, length: f64) -> Self {
        Dimensions {
            width,
            height,
            length,
        }
    }

    /// Sides ordered longest first
    pub fn sorted_desc(&self) -> [f64; 3] {
        let mut sides = [self.width, self.height, self.length];
        sides.sort_by(|a, b| b.total_cmp(a));
        sides
    }

    /// Longest side plus girth (twice the sum of the two shorter sides)
    pub fn length_plus_girth(&self) -> f64 {
        let [longest, second, third] = self.sorted_desc();
        longest + 2.0 * (second + third)
    }

    /// Largest single side
    pub fn longest_side(&self) -> f64 {
        self.sorted_desc()[0]
    }
}

// ============================================================================
// Package & Shipment
// ============================================================================

/// Shipper-assigned reference printed on labels and invoices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceNumber {
    pub code: String,
    pub value: String,
}

/// Physical description of one parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub weight: Weight,

    #[serde(default)]
    pub dimensions: Option<Dimensions>,

    /// Carrier packaging/container code (UPS "02", USPS "RECTANGULAR", ...)
    #[serde(default)]
    pub packaging: Option<String>,

    /// Carrier service code for this parcel, when the carrier rates per parcel
    #[serde(default)]
    pub service: Option<String>,

    /// Merchandise description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub reference: Option<ReferenceNumber>,

    #[serde(default)]
    pub additional_handling: bool,

    #[serde(default = "default_machinable")]
    pub machinable: bool,
}

fn default_machinable() -> bool {
    true
}

impl Package {
    /// Create a package with only a weight set
    pub fn new(weight: Weight) -> Self {
        Package {
            weight,
            dimensions: None,
            packaging: None,
            service: None,
            description: None,
            reference: None,
            additional_handling: false,
            machinable: true,
        }
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_packaging(mut self, code: impl Into<String>) -> Self {
        self.packaging = Some(code.into());
        self
    }

    pub fn with_service(mut self, code: impl Into<String>) -> Self {
        self.service = Some(code.into());
        self
    }

    pub fn with_reference(mut self, code: impl Into<String>, value: impl Into<String>) -> Self {
        self.reference = Some(ReferenceNumber {
            code: code.into(),
            value: value.into(),
        });
        self
    }
}

/// One or more packages moving from a shipper to a recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub shipper: Address,
    pub ship_to: Address,

    /// Origin when it differs from the shipper's address
    #[serde(default)]
    pub ship_from: Option<Address>,

    pub packages: Vec<Package>,

    /// Carrier service code; carriers fall back to a ground-like default
    #[serde(default)]
    pub service: Option<String>,

    #[serde(default)]
    pub pickup_type: Option<String>,

    /// Shipper account used for billing and negotiated rates
    #[serde(default)]
    pub shipper_number: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// UPS customer classification code (rate table to quote from)
    #[serde(default)]
    pub customer_classification: Option<String>,

    /// Ask for the account's negotiated rates alongside published ones
    #[serde(default)]
    pub negotiated_rates: bool,
}

impl Shipment {
    pub fn new(shipper: Address, ship_to: Address, packages: Vec<Package>) -> Self {
        Shipment {
            shipper,
            ship_to,
            ship_from: None,
            packages,
            service: None,
            pickup_type: None,
            shipper_number: None,
            description: None,
            customer_classification: None,
            negotiated_rates: false,
        }
    }

    pub fn with_service(mut self, code: impl Into<String>) -> Self {
        self.service = Some(code.into());
        self
    }

    pub fn with_customer_classification(mut self, code: impl Into<String>) -> Self {
        self.customer_classification = Some(code.into());
        self
    }

    pub fn with_negotiated_rates(mut self) -> Self {
        self.negotiated_rates = true;
        self
    }

    /// Address the parcels physically leave from
    pub fn origin(&self) -> &Address {
        self.ship_from.as_ref().unwrap_or(&self.shipper)
    }

    /// Non-empty service selection, if any
    pub fn selected_service(&self) -> Option<&str> {
        self.service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_conversion() {
        let w = Weight::pounds(5.0);
        assert_eq!(w.as_ounces(), 80.0);
        assert_eq!(Weight::ounces(8.0).as_pounds(), 0.5);
    }

    #[test]
    fn test_length_plus_girth() {
        let dims = Dimensions::new(10.0, 20.0, 60.0);
        assert_eq!(dims.longest_side(), 60.0);
        assert_eq!(dims.length_plus_girth(), 60.0 + 2.0 * 30.0);
    }

    #[test]
    fn test_zip5() {
        let mut addr = Address {
            postal_code: "30301-1234".to_string(),
            ..Default::default()
        };
        assert_eq!(addr.zip5(), Some("30301"));

        addr.postal_code = "SW1A 1AA".to_string();
        assert_eq!(addr.zip5(), None);
    }

    #[test]
    fn test_selected_service_ignores_blank() {
        let shipment = Shipment::new(
            Address::default(),
            Address::default(),
            vec![Package::new(Weight::pounds(1.0))],
        )
        .with_service("  ");

        assert_eq!(shipment.selected_service(), None);
    }

    #[test]
    fn test_package_json_defaults() {
        let pkg: Package = serde_json::from_str(r#"{"weight":{"ounces":12.0}}"#).unwrap();
        assert!(pkg.machinable);
        assert!(pkg.dimensions.is_none());
    }
}
