//! USPS RateV4 wire models
//!
//! Element order follows the RateV4 schema, which USPS enforces.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateV4Request {
    #[serde(rename = "@USERID")]
    pub user_id: String,
    pub revision: String,
    #[serde(rename = "Package")]
    pub packages: Vec<RatePackage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatePackage {
    #[serde(rename = "@ID")]
    pub id: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_class_mail_type: Option<String>,
    pub zip_origination: String,
    pub zip_destination: String,
    pub pounds: String,
    pub ounces: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub girth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machinable: Option<String>,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateV4Response {
    #[serde(rename = "Package", default)]
    pub packages: Vec<RatedPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatedPackage {
    #[serde(rename = "@ID", default)]
    pub id: String,
    #[serde(default)]
    pub postage: Vec<Postage>,
    pub error: Option<UspsError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Postage {
    #[serde(rename = "@CLASSID", default)]
    pub class_id: String,
    #[serde(default)]
    pub mail_service: String,
    /// Kept as text so a malformed amount is reported with its value
    #[serde(default)]
    pub rate: String,
}

/// Error block, either as the whole document or inside a package
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UspsError {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub description: String,
}
