//! UPS request builder and response normalizer
//!
//! Maps validated shipments into UPS wire requests and maps UPS responses
//! back into unified estimates and labels.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::carriers::traits::{CarrierCredentials, CarrierError, RateMode, ValidationError};
use crate::domain::{Address, Estimate, Label, Provider, PurchasedShipment};

use super::codes::UpsCodeTable;
use super::models::*;
use super::validate::{UpsPackage, UpsShipment};

const LABEL_FORMAT: &str = "GIF";
const LABEL_USER_AGENT: &str = "Mozilla/4.5";

/// Mapper between unified models and UPS wire models
pub struct UpsMapper;

impl UpsMapper {
    /// Build the credentials document that precedes every request
    pub fn access_request(credentials: &CarrierCredentials) -> AccessRequest {
        AccessRequest {
            lang: "en-US",
            access_license_number: credentials.access_key.clone().unwrap_or_default(),
            user_id: credentials.user_id.clone().unwrap_or_default(),
            password: credentials.password.clone().unwrap_or_default(),
        }
    }

    /// Build a rating request
    ///
    /// Shop mode asks for every service and leaves the Service block off;
    /// rate mode asks for the validated (or default) service only.
    pub fn rate_request(
        validated: &UpsShipment<'_>,
        credentials: &CarrierCredentials,
        mode: RateMode,
        codes: &UpsCodeTable,
        customer_context: &str,
    ) -> RatingServiceSelectionRequest {
        let (option, service) = match mode {
            RateMode::Rate => ("Rate", Some(Self::service_block(validated, codes))),
            RateMode::Shop => ("Shop", None),
        };

        RatingServiceSelectionRequest {
            request: RequestHeader {
                transaction_reference: TransactionReference {
                    customer_context: customer_context.to_string(),
                },
                request_action: "Rate",
                request_option: Some(option),
            },
            pickup_type: CodeDescription {
                code: validated.pickup.code().to_string(),
                description: non_empty(codes.pickup_name(validated.pickup.code())),
            },
            customer_classification: validated.classification.map(|c| CodeDescription {
                code: c.code().to_string(),
                description: Some(c.name().to_string()),
            }),
            shipment: Self::shipment(validated, credentials, service, None, codes),
        }
    }

    /// Build a ShipConfirm request; billing goes to the shipper account
    pub fn confirm_request(
        validated: &UpsShipment<'_>,
        credentials: &CarrierCredentials,
        codes: &UpsCodeTable,
        customer_context: &str,
    ) -> Result<ShipmentConfirmRequest, ValidationError> {
        let account = shipper_number(validated, credentials)
            .ok_or(ValidationError::MissingShipperNumber)?;

        let payment = PaymentInformation {
            prepaid: Prepaid {
                bill_shipper: BillShipper {
                    account_number: account,
                },
            },
        };
        let service = Self::service_block(validated, codes);

        Ok(ShipmentConfirmRequest {
            request: RequestHeader {
                transaction_reference: TransactionReference {
                    customer_context: customer_context.to_string(),
                },
                request_action: "ShipConfirm",
                request_option: Some("validate"),
            },
            shipment: Self::shipment(validated, credentials, Some(service), Some(payment), codes),
            label_specification: LabelSpecification {
                label_print_method: CodeDescription {
                    code: LABEL_FORMAT.to_string(),
                    description: Some(LABEL_FORMAT.to_string()),
                },
                http_user_agent: LABEL_USER_AGENT.to_string(),
                label_image_format: CodeDescription {
                    code: LABEL_FORMAT.to_string(),
                    description: Some(LABEL_FORMAT.to_string()),
                },
            },
        })
    }

    /// Build a ShipAccept request for a confirmed shipment digest
    pub fn accept_request(digest: &str, customer_context: &str) -> ShipmentAcceptRequest {
        ShipmentAcceptRequest {
            request: RequestHeader {
                transaction_reference: TransactionReference {
                    customer_context: customer_context.to_string(),
                },
                request_action: "ShipAccept",
                request_option: None,
            },
            shipment_digest: digest.to_string(),
        }
    }

    fn service_block(validated: &UpsShipment<'_>, codes: &UpsCodeTable) -> CodeDescription {
        let code = validated.service.code();
        CodeDescription {
            code: code.to_string(),
            description: non_empty(codes.service_name(code)),
        }
    }

    fn shipment(
        validated: &UpsShipment<'_>,
        credentials: &CarrierCredentials,
        service: Option<CodeDescription>,
        payment_information: Option<PaymentInformation>,
        codes: &UpsCodeTable,
    ) -> ShipmentType {
        let shipment = validated.shipment;

        ShipmentType {
            description: shipment.description.clone(),
            shipper: ShipperType {
                name: shipment.shipper.display_name().to_string(),
                shipper_number: shipper_number(validated, credentials),
                address: Self::address(&shipment.shipper),
            },
            ship_to: Self::party(&shipment.ship_to),
            ship_from: shipment.ship_from.as_ref().map(Self::party),
            service,
            payment_information,
            packages: validated
                .packages
                .iter()
                .map(|p| Self::package(p, codes))
                .collect(),
            rate_information: shipment.negotiated_rates.then_some(RateInformation {
                negotiated_rates_indicator: Indicator,
            }),
        }
    }

    fn party(address: &Address) -> PartyType {
        PartyType {
            company_name: address.display_name().to_string(),
            phone_number: address.phone.clone(),
            address: Self::address(address),
        }
    }

    fn address(address: &Address) -> AddressType {
        AddressType {
            address_line1: address.street1.clone(),
            address_line2: address.street2.clone(),
            address_line3: address.street3.clone(),
            city: address.city.clone(),
            state_province_code: address.state_province.clone(),
            postal_code: address.postal_code.clone(),
            country_code: address.country.to_uppercase(),
            residential_address_indicator: address.residential.then_some(Indicator),
        }
    }

    /// Map a validated package; absent dimensions and flags stay off the wire
    pub fn package(package: &UpsPackage, codes: &UpsCodeTable) -> PackageType {
        let code = package.packaging.code();

        PackageType {
            packaging_type: CodeDescription {
                code: code.to_string(),
                description: non_empty(codes.packaging_name(code)),
            },
            description: package.description.clone(),
            dimensions: package.dimensions.map(|d| DimensionsType {
                unit_of_measurement: UnitOfMeasurement { code: "IN" },
                length: format!("{:.2}", d.length),
                width: format!("{:.2}", d.width),
                height: format!("{:.2}", d.height),
            }),
            package_weight: PackageWeight {
                unit_of_measurement: UnitOfMeasurement { code: "LBS" },
                weight: format!("{:.1}", package.weight_lbs),
            },
            reference_number: package
                .reference
                .iter()
                .map(|r| ReferenceNumberType {
                    code: r.code.clone(),
                    value: r.value.clone(),
                })
                .collect(),
            large_package_indicator: package.large_package.then_some(Indicator),
            additional_handling: package.additional_handling.then_some(Indicator),
        }
    }

    /// Turn a failed response status into a carrier rejection
    pub fn check_status(header: &ResponseHeader) -> Result<(), CarrierError> {
        if header.response_status_code == 1 {
            return Ok(());
        }

        let (code, message) = match header.error.first() {
            Some(err) => (
                err.error_code.clone(),
                err.error_description.clone().unwrap_or_default(),
            ),
            None => (
                header.response_status_code.to_string(),
                header.response_status_description.clone().unwrap_or_default(),
            ),
        };

        Err(CarrierError::Rejected { code, message })
    }

    /// Map every rated shipment in the response to an estimate
    pub fn estimates(
        response: RatingServiceSelectionResponse,
        codes: &UpsCodeTable,
    ) -> Result<Vec<Estimate>, CarrierError> {
        Self::check_status(&response.response)?;

        response
            .rated_shipment
            .into_iter()
            .map(|rated| {
                let code = rated.service.code.trim().to_string();
                let price = rated.total_charges.monetary_value;
                if !(price >= 0.0) {
                    return Err(CarrierError::Parse(format!(
                        "negative or invalid charge {} for service {}",
                        price, code
                    )));
                }

                let name = codes.service_name(&code).to_string();
                Ok(Estimate::new(name, Provider::Ups, code, price))
            })
            .collect()
    }

    /// Pull the digest out of a ShipConfirm response
    pub fn confirmed_digest(response: ShipmentConfirmResponse) -> Result<String, CarrierError> {
        Self::check_status(&response.response)?;

        response
            .shipment_digest
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| CarrierError::Parse("ShipConfirm response has no digest".to_string()))
    }

    /// Decode labels from a ShipAccept response
    pub fn purchased(response: ShipmentAcceptResponse) -> Result<PurchasedShipment, CarrierError> {
        Self::check_status(&response.response)?;

        let results = response.shipment_results.ok_or_else(|| {
            CarrierError::Parse("ShipAccept response has no ShipmentResults".to_string())
        })?;

        let total_charges = results
            .shipment_charges
            .as_ref()
            .map(|c| c.total_charges.monetary_value)
            .unwrap_or_default();

        Ok(PurchasedShipment {
            provider: Provider::Ups,
            identification_number: results.shipment_identification_number,
            total_charges,
            labels: Self::extract_labels(results.package_results)?,
        })
    }

    /// Base64-decode each package's label image
    pub fn extract_labels(results: Vec<PackageResult>) -> Result<Vec<Label>, CarrierError> {
        results
            .into_iter()
            .map(|result| {
                let encoded: String = result
                    .label_image
                    .graphic_image
                    .split_whitespace()
                    .collect();
                Ok(Label {
                    tracking_number: result.tracking_number,
                    format: result.label_image.label_image_format.code,
                    image: STANDARD.decode(encoded)?,
                })
            })
            .collect()
    }
}

fn shipper_number(validated: &UpsShipment<'_>, credentials: &CarrierCredentials) -> Option<String> {
    validated
        .shipment
        .shipper_number
        .clone()
        .or_else(|| credentials.shipper_number.clone())
        .filter(|n| !n.trim().is_empty())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carriers::ups::validate::validate_shipment;
    use crate::carriers::xml;
    use crate::domain::{Dimensions, Package, Shipment, Weight};

    fn address(zip: &str) -> Address {
        Address {
            name: "Jane Doe".to_string(),
            street1: "1 Main St".to_string(),
            city: "Atlanta".to_string(),
            state_province: "GA".to_string(),
            postal_code: zip.to_string(),
            country: "US".to_string(),
            ..Default::default()
        }
    }

    fn credentials() -> CarrierCredentials {
        CarrierCredentials {
            access_key: Some("KEY".to_string()),
            user_id: Some("user".to_string()),
            password: Some("pass".to_string()),
            shipper_number: None,
        }
    }

    fn render_rate(shipment: &Shipment, mode: RateMode) -> String {
        let codes = UpsCodeTable::new();
        let validated = validate_shipment(shipment).unwrap();
        let request = UpsMapper::rate_request(&validated, &credentials(), mode, &codes, "ctx");
        xml::render("RatingServiceSelectionRequest", &request).unwrap()
    }

    #[test]
    fn test_shop_request_omits_service_and_optional_blocks() {
        let shipment = Shipment::new(
            address("30301"),
            address("10001"),
            vec![Package::new(Weight::pounds(5.0)).with_packaging("02")],
        );
        let rendered = render_rate(&shipment, RateMode::Shop);

        assert!(rendered.contains("<RequestOption>Shop</RequestOption>"));
        assert!(!rendered.contains("<Service>"));
        assert!(!rendered.contains("Dimensions"));
        assert!(!rendered.contains("ReferenceNumber"));
        assert!(!rendered.contains("ShipFrom"));
        assert!(!rendered.contains("PaymentInformation"));
        assert!(!rendered.contains("LargePackageIndicator"));
        assert!(!rendered.contains("AddressLine2"));
        assert!(!rendered.contains("CustomerClassification"));
        assert!(!rendered.contains("RateInformation"));
        assert!(rendered.contains("<Weight>5.0</Weight>"));
    }

    #[test]
    fn test_classification_and_negotiated_rates_sent_when_requested() {
        let shipment = Shipment::new(
            address("30301"),
            address("10001"),
            vec![Package::new(Weight::pounds(5.0))],
        )
        .with_customer_classification("04")
        .with_negotiated_rates();
        let rendered = render_rate(&shipment, RateMode::Shop);

        assert!(rendered.contains(
            "<CustomerClassification><Code>04</Code><Description>Retail Rates</Description></CustomerClassification>"
        ));
        assert!(rendered.contains(
            "<RateInformation><NegotiatedRatesIndicator/></RateInformation>"
        ));
    }

    #[test]
    fn test_rate_request_defaults_service_to_ground() {
        let shipment = Shipment::new(
            address("30301"),
            address("10001"),
            vec![Package::new(Weight::pounds(5.0))],
        );
        let rendered = render_rate(&shipment, RateMode::Rate);

        assert!(rendered.contains("<RequestOption>Rate</RequestOption>"));
        assert!(rendered
            .contains("<Service><Code>03</Code><Description>Ground</Description></Service>"));
    }

    #[test]
    fn test_supplied_dimensions_and_reference_rendered() {
        let shipment = Shipment::new(
            address("30301"),
            address("10001"),
            vec![
                Package::new(Weight::pounds(5.0))
                    .with_dimensions(Dimensions::new(10.0, 8.0, 12.0))
                    .with_reference("PO", "12345"),
                Package::new(Weight::pounds(40.0))
                    .with_dimensions(Dimensions::new(20.0, 30.0, 50.0)),
            ],
        );
        let rendered = render_rate(&shipment, RateMode::Shop);

        assert!(rendered.contains("<Length>12.00</Length>"));
        assert!(rendered
            .contains("<ReferenceNumber><Code>PO</Code><Value>12345</Value></ReferenceNumber>"));
        assert!(rendered.contains("<LargePackageIndicator/><AdditionalHandling/>"));
        assert_eq!(rendered.matches("<LargePackageIndicator/>").count(), 1);
    }

    #[test]
    fn test_confirm_requires_shipper_number() {
        let codes = UpsCodeTable::new();
        let shipment = Shipment::new(
            address("30301"),
            address("10001"),
            vec![Package::new(Weight::pounds(5.0))],
        );
        let validated = validate_shipment(&shipment).unwrap();

        assert_eq!(
            UpsMapper::confirm_request(&validated, &credentials(), &codes, "ctx").err(),
            Some(ValidationError::MissingShipperNumber)
        );

        let mut creds = credentials();
        creds.shipper_number = Some("A1B2C3".to_string());
        let request = UpsMapper::confirm_request(&validated, &creds, &codes, "ctx").unwrap();
        let rendered = xml::render("ShipmentConfirmRequest", &request).unwrap();
        assert!(rendered.contains("<AccountNumber>A1B2C3</AccountNumber>"));
        assert!(rendered.contains("<HTTPUserAgent>"));
    }

    #[test]
    fn test_failed_status_is_rejected() {
        let body = br#"<RatingServiceSelectionResponse>
            <Response>
                <ResponseStatusCode>0</ResponseStatusCode>
                <ResponseStatusDescription>Failure</ResponseStatusDescription>
                <Error>
                    <ErrorSeverity>Hard</ErrorSeverity>
                    <ErrorCode>111285</ErrorCode>
                    <ErrorDescription>The postal code is invalid.</ErrorDescription>
                </Error>
            </Response>
        </RatingServiceSelectionResponse>"#;
        let response: RatingServiceSelectionResponse =
            xml::parse("RatingServiceSelectionResponse", body).unwrap();

        match UpsMapper::estimates(response, &UpsCodeTable::new()) {
            Err(CarrierError::Rejected { code, message }) => {
                assert_eq!(code, "111285");
                assert_eq!(message, "The postal code is invalid.");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_service_gets_empty_name() {
        let body = br#"<RatingServiceSelectionResponse>
            <Response><ResponseStatusCode>1</ResponseStatusCode></Response>
            <RatedShipment>
                <Service><Code>96</Code></Service>
                <TotalCharges><CurrencyCode>USD</CurrencyCode><MonetaryValue>140.00</MonetaryValue></TotalCharges>
            </RatedShipment>
        </RatingServiceSelectionResponse>"#;
        let response: RatingServiceSelectionResponse =
            xml::parse("RatingServiceSelectionResponse", body).unwrap();
        let estimates = UpsMapper::estimates(response, &UpsCodeTable::new()).unwrap();

        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].service(), "96");
        assert_eq!(estimates[0].name(), "");
        assert_eq!(estimates[0].price(), 140.0);
    }

    #[test]
    fn test_negative_charge_is_parse_error() {
        let body = br#"<RatingServiceSelectionResponse>
            <Response><ResponseStatusCode>1</ResponseStatusCode></Response>
            <RatedShipment>
                <Service><Code>03</Code></Service>
                <TotalCharges><MonetaryValue>-1.00</MonetaryValue></TotalCharges>
            </RatedShipment>
        </RatingServiceSelectionResponse>"#;
        let response: RatingServiceSelectionResponse =
            xml::parse("RatingServiceSelectionResponse", body).unwrap();

        assert!(matches!(
            UpsMapper::estimates(response, &UpsCodeTable::new()),
            Err(CarrierError::Parse(_))
        ));
    }

    #[test]
    fn test_extract_labels_decodes_base64() {
        let results = vec![PackageResult {
            tracking_number: "1Z999".to_string(),
            label_image: LabelImage {
                label_image_format: LabelImageFormat {
                    code: "GIF".to_string(),
                },
                graphic_image: "R0lG\nODlh".to_string(),
            },
        }];

        let labels = UpsMapper::extract_labels(results).unwrap();
        assert_eq!(labels[0].tracking_number, "1Z999");
        assert_eq!(labels[0].image, b"GIF89a".to_vec());
    }
}
