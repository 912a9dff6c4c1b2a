//! UPS XML wire models
//!
//! UPS validates requests strictly, and for many blocks "absent" and
//! "present but empty" mean different things. The rate request in
//! particular wants most optional blocks to be left out entirely.
//! Every zero-or-one block here is an `Option` or `Vec` that is skipped
//! when empty, so nothing empty is ever rendered.

use serde::{Deserialize, Serialize};

// ============================================================================
// Shared Request Blocks
// ============================================================================

/// Credentials document sent ahead of every request
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessRequest {
    #[serde(rename = "@xml:lang")]
    pub lang: &'static str,
    pub access_license_number: String,
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionReference {
    pub customer_context: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
    pub transaction_reference: TransactionReference,
    pub request_action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_option: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeDescription {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressType {
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line3: Option<String>,
    pub city: String,
    pub state_province_code: String,
    pub postal_code: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residential_address_indicator: Option<Indicator>,
}

/// Presence-only flag, rendered as an empty element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipperType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipper_number: Option<String>,
    pub address: AddressType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartyType {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub address: AddressType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillShipper {
    pub account_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Prepaid {
    pub bill_shipper: BillShipper,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentInformation {
    pub prepaid: Prepaid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateInformation {
    pub negotiated_rates_indicator: Indicator,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub shipper: ShipperType,
    pub ship_to: PartyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_from: Option<PartyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<CodeDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_information: Option<PaymentInformation>,
    #[serde(rename = "Package", skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_information: Option<RateInformation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReferenceNumberType {
    pub code: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitOfMeasurement {
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageWeight {
    pub unit_of_measurement: UnitOfMeasurement,
    /// Pounds, precision 6.1
    pub weight: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimensionsType {
    pub unit_of_measurement: UnitOfMeasurement,
    /// Inches, precision 6.2
    pub length: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageType {
    pub packaging_type: CodeDescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<DimensionsType>,
    pub package_weight: PackageWeight,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_number: Vec<ReferenceNumberType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_package_indicator: Option<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_handling: Option<Indicator>,
}

// ============================================================================
// Rating
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingServiceSelectionRequest {
    pub request: RequestHeader,
    pub pickup_type: CodeDescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_classification: Option<CodeDescription>,
    pub shipment: ShipmentType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseHeader {
    pub response_status_code: i32,
    #[serde(default)]
    pub response_status_description: Option<String>,
    #[serde(default)]
    pub error: Vec<ResponseError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseError {
    #[serde(default)]
    pub error_severity: Option<String>,
    pub error_code: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Charges {
    #[serde(default)]
    pub currency_code: Option<String>,
    pub monetary_value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRef {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatedShipment {
    pub service: ServiceRef,
    #[serde(default)]
    pub rated_shipment_warning: Vec<String>,
    #[serde(default)]
    pub transportation_charges: Option<Charges>,
    #[serde(default)]
    pub service_options_charges: Option<Charges>,
    pub total_charges: Charges,
    #[serde(default)]
    pub guaranteed_days_to_delivery: Option<String>,
    #[serde(default)]
    pub scheduled_delivery_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingServiceSelectionResponse {
    pub response: ResponseHeader,
    #[serde(default)]
    pub rated_shipment: Vec<RatedShipment>,
}

// ============================================================================
// Shipping
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelSpecification {
    pub label_print_method: CodeDescription,
    #[serde(rename = "HTTPUserAgent")]
    pub http_user_agent: String,
    pub label_image_format: CodeDescription,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentConfirmRequest {
    pub request: RequestHeader,
    pub shipment: ShipmentType,
    pub label_specification: LabelSpecification,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentCharges {
    #[serde(default)]
    pub transportation_charges: Option<Charges>,
    #[serde(default)]
    pub service_options_charges: Option<Charges>,
    pub total_charges: Charges,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentConfirmResponse {
    pub response: ResponseHeader,
    #[serde(default)]
    pub shipment_charges: Option<ShipmentCharges>,
    #[serde(default)]
    pub shipment_identification_number: Option<String>,
    #[serde(default)]
    pub shipment_digest: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentAcceptRequest {
    pub request: RequestHeader,
    pub shipment_digest: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelImageFormat {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelImage {
    pub label_image_format: LabelImageFormat,
    /// Base64 encoded label
    pub graphic_image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageResult {
    pub tracking_number: String,
    pub label_image: LabelImage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentResults {
    #[serde(default)]
    pub shipment_charges: Option<ShipmentCharges>,
    pub shipment_identification_number: String,
    #[serde(default)]
    pub package_results: Vec<PackageResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentAcceptResponse {
    pub response: ResponseHeader,
    #[serde(default)]
    pub shipment_results: Option<ShipmentResults>,
}
