//! UPS package and shipment validation
//!
//! Checks weight and dimension limits and works out the indicator flags UPS
//! expects the shipper to send rather than derive itself.

use crate::carriers::traits::ValidationError;
use crate::domain::{Address, Dimensions, Package, ReferenceNumber, Shipment};

use super::codes::{CustomerClassification, PackagingType, PickupType, ServiceCode};

/// Lightest package UPS will rate, in pounds
pub const MIN_WEIGHT_LBS: f64 = 0.1;
/// Heaviest package UPS will rate, in pounds
pub const MAX_WEIGHT_LBS: f64 = 150.0;

const LARGE_PACKAGE_LENGTH_PLUS_GIRTH: f64 = 130.0;
const ADDITIONAL_HANDLING_LONGEST_SIDE: f64 = 48.0;
const ADDITIONAL_HANDLING_SECOND_SIDE: f64 = 30.0;

/// Origin/destination pairs that always need dimensions
const DIMENSIONED_DOMESTIC: [&str; 2] = ["GB", "PL"];

/// A package that passed UPS validation
#[derive(Debug, Clone, PartialEq)]
pub struct UpsPackage {
    pub packaging: PackagingType,
    pub weight_lbs: f64,
    /// Dimensions to send; `None` means the block is left off the wire
    pub dimensions: Option<Dimensions>,
    pub large_package: bool,
    pub additional_handling: bool,
    pub description: Option<String>,
    pub reference: Option<ReferenceNumber>,
}

/// A shipment that passed UPS validation
#[derive(Debug, Clone, PartialEq)]
pub struct UpsShipment<'a> {
    pub shipment: &'a Shipment,
    pub service: ServiceCode,
    pub pickup: PickupType,
    pub classification: Option<CustomerClassification>,
    pub packages: Vec<UpsPackage>,
}

/// Validate a shipment and all of its packages
pub fn validate_shipment(shipment: &Shipment) -> Result<UpsShipment<'_>, ValidationError> {
    if shipment.packages.is_empty() {
        return Err(ValidationError::NoPackages);
    }

    require_address(&shipment.shipper, "shipper")?;
    require_address(&shipment.ship_to, "ship-to")?;
    if let Some(from) = &shipment.ship_from {
        require_address(from, "ship-from")?;
    }

    let service = match shipment.selected_service() {
        Some(code) => ServiceCode::from_code(code)?,
        None => ServiceCode::default(),
    };
    let pickup = match shipment.pickup_type.as_deref() {
        Some(code) => PickupType::from_code(code)?,
        None => PickupType::Daily,
    };
    let classification = match shipment.customer_classification.as_deref() {
        Some(code) if !code.trim().is_empty() => Some(CustomerClassification::from_code(code)?),
        _ => None,
    };

    let dimensions_required = requires_dimensions(shipment);
    let packages = shipment
        .packages
        .iter()
        .enumerate()
        .map(|(index, package)| validate_package(index, package, dimensions_required))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UpsShipment {
        shipment,
        service,
        pickup,
        classification,
        packages,
    })
}

/// Validate one package
///
/// `dimensions_required` is set for lanes where UPS needs dimensions on
/// every customer-supplied package.
pub fn validate_package(
    index: usize,
    package: &Package,
    dimensions_required: bool,
) -> Result<UpsPackage, ValidationError> {
    let packaging = match package.packaging.as_deref() {
        Some(code) => PackagingType::from_code(code)?,
        None => PackagingType::Package,
    };

    let weight_lbs = package.weight.as_pounds();
    if weight_lbs > MAX_WEIGHT_LBS {
        return Err(ValidationError::TooHeavy {
            index,
            weight: weight_lbs,
            max: MAX_WEIGHT_LBS,
            unit: "lbs",
        });
    }
    if weight_lbs < MIN_WEIGHT_LBS || weight_lbs.is_nan() {
        return Err(ValidationError::TooLight {
            index,
            weight: weight_lbs,
            min: MIN_WEIGHT_LBS,
            unit: "lbs",
        });
    }

    let dimensions = if packaging.is_fixed_size() {
        None
    } else {
        match package.dimensions {
            Some(dims) => Some(check_dimensions(index, dims)?),
            None if dimensions_required || packaging == PackagingType::Pallet => {
                return Err(ValidationError::MissingDimensions {
                    index,
                    packaging: format!("UPS packaging {}", packaging.code()),
                });
            }
            None => None,
        }
    };

    let large_package = dimensions
        .map(|d| d.length_plus_girth() > LARGE_PACKAGE_LENGTH_PLUS_GIRTH)
        .unwrap_or(false);

    let oversize_sides = dimensions
        .map(|d| {
            let [longest, second, _] = d.sorted_desc();
            longest > ADDITIONAL_HANDLING_LONGEST_SIDE || second > ADDITIONAL_HANDLING_SECOND_SIDE
        })
        .unwrap_or(false);

    Ok(UpsPackage {
        packaging,
        weight_lbs,
        dimensions,
        large_package,
        additional_handling: package.additional_handling || oversize_sides,
        description: package.description.clone(),
        reference: package.reference.clone(),
    })
}

fn check_dimensions(index: usize, dims: Dimensions) -> Result<Dimensions, ValidationError> {
    for (axis, value) in [
        ("width", dims.width),
        ("height", dims.height),
        ("length", dims.length),
    ] {
        // Written so NaN fails too
        if !(value > 0.0) {
            return Err(ValidationError::NonPositiveDimension { index, axis });
        }
    }
    Ok(dims)
}

fn requires_dimensions(shipment: &Shipment) -> bool {
    DIMENSIONED_DOMESTIC
        .iter()
        .any(|c| shipment.origin().is_in(c) && shipment.ship_to.is_in(c))
}

fn require_address(address: &Address, role: &'static str) -> Result<(), ValidationError> {
    if address.postal_code.trim().is_empty() {
        return Err(ValidationError::MissingAddressField(role, "postal code"));
    }
    if address.country.trim().is_empty() {
        return Err(ValidationError::MissingAddressField(role, "country"));
    }
    Ok(())
}
