//! USPS package validation
//!
//! Classifies each package as REGULAR or LARGE, checks weight limits, and
//! works out the container and First-Class flags RateV4 expects.

use crate::carriers::traits::ValidationError;
use crate::domain::{Dimensions, Package, Shipment};

use super::codes::{Container, FirstClassMailType, MailService};

/// Lightest package USPS will rate, in ounces; the request carries tenths
pub const MIN_WEIGHT_OZ: f64 = 0.1;
/// Heaviest package USPS will rate, in ounces (70 lbs)
pub const MAX_WEIGHT_OZ: f64 = 1120.0;
/// Heaviest package eligible for First-Class, in ounces
pub const FIRST_CLASS_MAX_OZ: f64 = 13.0;
/// Any side longer than this makes the package LARGE
pub const REGULAR_MAX_SIDE_IN: f64 = 12.0;

/// RateV4 size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Regular,
    Large,
}

impl SizeClass {
    pub fn code(&self) -> &'static str {
        match self {
            SizeClass::Regular => "REGULAR",
            SizeClass::Large => "LARGE",
        }
    }
}

/// A package that passed USPS validation
#[derive(Debug, Clone, PartialEq)]
pub struct UspsPackage {
    pub service: MailService,
    pub container: Option<Container>,
    pub size: SizeClass,
    /// Only set for LARGE packages
    pub dimensions: Option<Dimensions>,
    pub weight_oz: f64,
    pub machinable: bool,
    pub is_large: bool,
    pub is_first_class: bool,
    pub first_class_eligible: bool,
    pub first_class_type: Option<FirstClassMailType>,
}

impl UspsPackage {
    /// Weight split into whole pounds and remaining ounces
    pub fn pounds_ounces(&self) -> (u32, f64) {
        let pounds = (self.weight_oz / 16.0).floor();
        let ounces = self.weight_oz - pounds * 16.0;
        (pounds as u32, (ounces * 10.0).round() / 10.0)
    }
}

/// A shipment that passed USPS validation
#[derive(Debug, Clone, PartialEq)]
pub struct UspsShipment {
    pub zip_origination: String,
    pub zip_destination: String,
    pub packages: Vec<UspsPackage>,
}

/// Validate a shipment for domestic USPS rating
pub fn validate_shipment(shipment: &Shipment) -> Result<UspsShipment, ValidationError> {
    if shipment.packages.is_empty() {
        return Err(ValidationError::NoPackages);
    }

    let zip_origination = shipment
        .origin()
        .zip5()
        .ok_or(ValidationError::MissingAddressField("origin", "5 digit ZIP code"))?
        .to_string();
    let zip_destination = shipment
        .ship_to
        .zip5()
        .ok_or(ValidationError::MissingAddressField("ship-to", "5 digit ZIP code"))?
        .to_string();

    let country = shipment.ship_to.country.trim();
    if !country.is_empty() && !shipment.ship_to.is_in("US") {
        return Err(ValidationError::Unsupported(format!(
            "USPS domestic rating cannot ship to {}",
            country
        )));
    }

    let packages = shipment
        .packages
        .iter()
        .enumerate()
        .map(|(index, package)| validate_package(index, package, shipment.selected_service()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UspsShipment {
        zip_origination,
        zip_destination,
        packages,
    })
}

/// Validate one package
///
/// The package's own service wins over the shipment's; with neither set
/// the package is rated as PARCEL.
pub fn validate_package(
    index: usize,
    package: &Package,
    shipment_service: Option<&str>,
) -> Result<UspsPackage, ValidationError> {
    let service = match package.service.as_deref().or(shipment_service) {
        Some(code) if !code.trim().is_empty() => MailService::from_code(code)?,
        _ => MailService::default(),
    };

    let weight_oz = package.weight.as_ounces();
    if !(weight_oz >= MIN_WEIGHT_OZ) {
        return Err(ValidationError::TooLight {
            index,
            weight: weight_oz,
            min: MIN_WEIGHT_OZ,
            unit: "oz",
        });
    }
    if weight_oz > MAX_WEIGHT_OZ {
        return Err(ValidationError::TooHeavy {
            index,
            weight: weight_oz,
            max: MAX_WEIGHT_OZ,
            unit: "oz",
        });
    }

    let is_large = package
        .dimensions
        .map(|d| d.longest_side() > REGULAR_MAX_SIDE_IN)
        .unwrap_or(false);

    let (size, dimensions) = if is_large {
        let dims = package.dimensions.ok_or_else(|| ValidationError::MissingDimensions {
            index,
            packaging: "LARGE USPS package".to_string(),
        })?;
        for (axis, value) in [
            ("width", dims.width),
            ("height", dims.height),
            ("length", dims.length),
        ] {
            if !(value > 0.0) {
                return Err(ValidationError::NonPositiveDimension { index, axis });
            }
        }
        (SizeClass::Large, Some(dims))
    } else {
        (SizeClass::Regular, None)
    };

    let container = match package.packaging.as_deref() {
        Some(code) if !code.trim().is_empty() => Some(Container::from_code(code)?),
        _ => None,
    };
    let container = match (size, container) {
        (SizeClass::Large, None) | (SizeClass::Large, Some(Container::Variable)) => {
            Some(Container::Rectangular)
        }
        (SizeClass::Large, Some(c)) if !c.is_dimensional() => {
            return Err(ValidationError::Unsupported(format!(
                "package {}: LARGE packages must use RECTANGULAR or NONRECTANGULAR, not {}",
                index,
                c.code()
            )));
        }
        (_, c) => c,
    };

    let is_first_class = service.is_first_class();
    let first_class_eligible = weight_oz <= FIRST_CLASS_MAX_OZ;
    if is_first_class && !first_class_eligible {
        return Err(ValidationError::TooHeavy {
            index,
            weight: weight_oz,
            max: FIRST_CLASS_MAX_OZ,
            unit: "oz",
        });
    }

    Ok(UspsPackage {
        service,
        container,
        size,
        dimensions,
        weight_oz,
        machinable: package.machinable,
        is_large,
        is_first_class,
        first_class_eligible,
        first_class_type: is_first_class.then_some(FirstClassMailType::Parcel),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Weight};

    fn zip(code: &str) -> Address {
        Address {
            postal_code: code.to_string(),
            country: "US".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_weight_bounds() {
        assert!(validate_package(0, &Package::new(Weight::ounces(1120.0)), None).is_ok());
        assert!(matches!(
            validate_package(0, &Package::new(Weight::ounces(1120.5)), None),
            Err(ValidationError::TooHeavy { .. })
        ));
        assert!(matches!(
            validate_package(0, &Package::new(Weight::ounces(0.0)), None),
            Err(ValidationError::TooLight { .. })
        ));
    }

    #[test]
    fn test_minimum_weight_boundary() {
        assert!(validate_package(0, &Package::new(Weight::ounces(0.1)), None).is_ok());
        assert_eq!(
            validate_package(0, &Package::new(Weight::ounces(0.04)), None),
            Err(ValidationError::TooLight {
                index: 0,
                weight: 0.04,
                min: MIN_WEIGHT_OZ,
                unit: "oz"
            })
        );
    }

    #[test]
    fn test_regular_package_drops_dimensions() {
        let pkg =
            Package::new(Weight::ounces(20.0)).with_dimensions(Dimensions::new(6.0, 4.0, 12.0));
        let validated = validate_package(0, &pkg, None).unwrap();

        assert_eq!(validated.size, SizeClass::Regular);
        assert!(!validated.is_large);
        assert!(validated.dimensions.is_none());
    }

    #[test]
    fn test_large_package_requires_positive_dimensions() {
        let pkg =
            Package::new(Weight::ounces(20.0)).with_dimensions(Dimensions::new(0.0, 4.0, 15.0));
        assert_eq!(
            validate_package(0, &pkg, None),
            Err(ValidationError::NonPositiveDimension {
                index: 0,
                axis: "width"
            })
        );

        let ok =
            Package::new(Weight::ounces(20.0)).with_dimensions(Dimensions::new(10.0, 4.0, 15.0));
        let validated = validate_package(0, &ok, None).unwrap();
        assert_eq!(validated.size, SizeClass::Large);
        assert!(validated.is_large);
        assert_eq!(validated.container, Some(Container::Rectangular));
        assert!(validated.dimensions.is_some());
    }

    #[test]
    fn test_large_package_rejects_flat_rate_container() {
        let pkg = Package::new(Weight::ounces(20.0))
            .with_packaging("FLAT RATE BOX")
            .with_dimensions(Dimensions::new(10.0, 4.0, 15.0));
        assert!(matches!(
            validate_package(0, &pkg, None),
            Err(ValidationError::Unsupported(_))
        ));
    }

    #[test]
    fn test_first_class_flags() {
        let pkg = Package::new(Weight::ounces(8.0)).with_service("FIRST CLASS");
        let validated = validate_package(0, &pkg, None).unwrap();
        assert!(validated.is_first_class);
        assert!(validated.first_class_eligible);
        assert_eq!(validated.first_class_type, Some(FirstClassMailType::Parcel));

        let heavy = Package::new(Weight::ounces(14.0)).with_service("FIRST CLASS");
        assert!(validate_package(0, &heavy, None).is_err());

        let priority = Package::new(Weight::ounces(14.0));
        let validated = validate_package(0, &priority, Some("PRIORITY")).unwrap();
        assert!(!validated.is_first_class);
        assert!(!validated.first_class_eligible);
        assert!(validated.first_class_type.is_none());
    }

    #[test]
    fn test_default_service_is_parcel() {
        let validated = validate_package(0, &Package::new(Weight::ounces(20.0)), None).unwrap();
        assert_eq!(validated.service, MailService::Parcel);
    }

    #[test]
    fn test_pounds_ounces_split() {
        let validated = validate_package(0, &Package::new(Weight::ounces(37.5)), None).unwrap();
        assert_eq!(validated.pounds_ounces(), (2, 5.5));
    }

    #[test]
    fn test_shipment_requires_zips_and_domestic_destination() {
        let parcel = || vec![Package::new(Weight::ounces(10.0))];
        let ok = Shipment::new(zip("20770"), zip("90210-1234"), parcel());
        let validated = validate_shipment(&ok).unwrap();
        assert_eq!(validated.zip_destination, "90210");

        let bad_zip = Shipment::new(zip("2077"), zip("90210"), parcel());
        assert!(matches!(
            validate_shipment(&bad_zip),
            Err(ValidationError::MissingAddressField("origin", _))
        ));

        let mut abroad = zip("90210");
        abroad.country = "CA".to_string();
        let intl = Shipment::new(zip("20770"), abroad, parcel());
        assert!(matches!(
            validate_shipment(&intl),
            Err(ValidationError::Unsupported(_))
        ));

        let empty = Shipment::new(zip("20770"), zip("90210"), Vec::new());
        assert_eq!(validate_shipment(&empty), Err(ValidationError::NoPackages));
    }
}
