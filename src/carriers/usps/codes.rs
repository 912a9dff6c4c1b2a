//! USPS code tables
//!
//! Container, First-Class mail type, and service names from the USPS Web
//! Tools RateV4 API, plus the CLASSID → description lookup used when
//! normalizing postage.

use std::collections::HashMap;

use crate::carriers::traits::ValidationError;

/// USPS container. RECTANGULAR or NONRECTANGULAR must be given for LARGE
/// packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Variable,
    FlatRateEnvelope,
    PaddedFlatRateEnvelope,
    LegalFlatRateEnvelope,
    SmallFlatRateEnvelope,
    WindowFlatRateEnvelope,
    GiftCardFlatRateEnvelope,
    FlatRateBox,
    SmallFlatRateBox,
    MediumFlatRateBox,
    LargeFlatRateBox,
    RegionalRateBoxA,
    RegionalRateBoxB,
    RegionalRateBoxC,
    Rectangular,
    Nonrectangular,
}

impl Container {
    pub const ALL: [Container; 16] = [
        Container::Variable,
        Container::FlatRateEnvelope,
        Container::PaddedFlatRateEnvelope,
        Container::LegalFlatRateEnvelope,
        Container::SmallFlatRateEnvelope,
        Container::WindowFlatRateEnvelope,
        Container::GiftCardFlatRateEnvelope,
        Container::FlatRateBox,
        Container::SmallFlatRateBox,
        Container::MediumFlatRateBox,
        Container::LargeFlatRateBox,
        Container::RegionalRateBoxA,
        Container::RegionalRateBoxB,
        Container::RegionalRateBoxC,
        Container::Rectangular,
        Container::Nonrectangular,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Container::Variable => "VARIABLE",
            Container::FlatRateEnvelope => "FLAT RATE ENVELOPE",
            Container::PaddedFlatRateEnvelope => "PADDED FLAT RATE ENVELOPE",
            Container::LegalFlatRateEnvelope => "LEGAL FLAT RATE ENVELOPE",
            Container::SmallFlatRateEnvelope => "SM FLAT RATE ENVELOPE",
            Container::WindowFlatRateEnvelope => "WINDOW FLAT RATE ENVELOPE",
            Container::GiftCardFlatRateEnvelope => "GIFT CARD FLAT RATE ENVELOPE",
            Container::FlatRateBox => "FLAT RATE BOX",
            Container::SmallFlatRateBox => "SM FLAT RATE BOX",
            Container::MediumFlatRateBox => "MD FLAT RATE BOX",
            Container::LargeFlatRateBox => "LG FLAT RATE BOX",
            Container::RegionalRateBoxA => "REGIONALRATEBOXA",
            Container::RegionalRateBoxB => "REGIONALRATEBOXB",
            Container::RegionalRateBoxC => "REGIONALRATEBOXC",
            Container::Rectangular => "RECTANGULAR",
            Container::Nonrectangular => "NONRECTANGULAR",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        Container::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::UnknownCode {
                kind: "USPS container",
                code: code.to_string(),
            })
    }

    /// Containers allowed for LARGE packages
    pub fn is_dimensional(&self) -> bool {
        matches!(self, Container::Rectangular | Container::Nonrectangular)
    }
}

/// First-Class mail type, required when the service is First-Class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstClassMailType {
    Letter,
    Flat,
    Parcel,
    Postcard,
    PackageService,
}

impl FirstClassMailType {
    pub fn code(&self) -> &'static str {
        match self {
            FirstClassMailType::Letter => "LETTER",
            FirstClassMailType::Flat => "FLAT",
            FirstClassMailType::Parcel => "PARCEL",
            FirstClassMailType::Postcard => "POSTCARD",
            FirstClassMailType::PackageService => "PACKAGE SERVICE",
        }
    }
}

/// USPS service requested in a RateV4 package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailService {
    FirstClass,
    FirstClassCommercial,
    FirstClassHfpCommercial,
    Priority,
    PriorityCommercial,
    PriorityHfpCommercial,
    Express,
    ExpressCommercial,
    ExpressSh,
    ExpressShCommercial,
    ExpressHfp,
    ExpressHfpCommercial,
    Parcel,
    Media,
    Library,
    All,
    Online,
}

impl MailService {
    pub const ALL: [MailService; 17] = [
        MailService::FirstClass,
        MailService::FirstClassCommercial,
        MailService::FirstClassHfpCommercial,
        MailService::Priority,
        MailService::PriorityCommercial,
        MailService::PriorityHfpCommercial,
        MailService::Express,
        MailService::ExpressCommercial,
        MailService::ExpressSh,
        MailService::ExpressShCommercial,
        MailService::ExpressHfp,
        MailService::ExpressHfpCommercial,
        MailService::Parcel,
        MailService::Media,
        MailService::Library,
        MailService::All,
        MailService::Online,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MailService::FirstClass => "FIRST CLASS",
            MailService::FirstClassCommercial => "FIRST CLASS COMMERCIAL",
            MailService::FirstClassHfpCommercial => "FIRST CLASS HFP COMMERCIAL",
            MailService::Priority => "PRIORITY",
            MailService::PriorityCommercial => "PRIORITY COMMERCIAL",
            MailService::PriorityHfpCommercial => "PRIORITY HFP COMMERCIAL",
            MailService::Express => "EXPRESS",
            MailService::ExpressCommercial => "EXPRESS COMMERCIAL",
            MailService::ExpressSh => "EXPRESS SH",
            MailService::ExpressShCommercial => "EXPRESS SH COMMERCIAL",
            MailService::ExpressHfp => "EXPRESS HFP",
            MailService::ExpressHfpCommercial => "EXPRESS HFP COMMERCIAL",
            MailService::Parcel => "PARCEL",
            MailService::Media => "MEDIA",
            MailService::Library => "LIBRARY",
            MailService::All => "ALL",
            MailService::Online => "ONLINE",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        MailService::ALL
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::UnknownCode {
                kind: "USPS service",
                code: code.to_string(),
            })
    }

    pub fn is_first_class(&self) -> bool {
        matches!(
            self,
            MailService::FirstClass
                | MailService::FirstClassCommercial
                | MailService::FirstClassHfpCommercial
        )
    }

    /// Services that return every mail class
    pub fn is_multi(&self) -> bool {
        matches!(self, MailService::All | MailService::Online)
    }
}

impl Default for MailService {
    fn default() -> Self {
        MailService::Parcel
    }
}

/// Read-only CLASSID → description lookup for USPS postage
#[derive(Debug, Clone)]
pub struct UspsCodeTable {
    classes: HashMap<&'static str, &'static str>,
}

impl UspsCodeTable {
    pub fn new() -> Self {
        let classes = [
            ("0", "First-Class Mail"),
            ("1", "Priority Mail"),
            ("2", "Priority Mail Express Hold For Pickup"),
            ("3", "Priority Mail Express"),
            ("4", "USPS Retail Ground"),
            ("6", "Media Mail"),
            ("7", "Library Mail"),
            ("13", "Priority Mail Express Flat Rate Envelope"),
            ("16", "Priority Mail Flat Rate Envelope"),
            ("17", "Priority Mail Medium Flat Rate Box"),
            ("22", "Priority Mail Large Flat Rate Box"),
            ("28", "Priority Mail Small Flat Rate Box"),
            ("29", "Priority Mail Padded Flat Rate Envelope"),
            ("38", "Priority Mail Gift Card Flat Rate Envelope"),
            ("44", "Priority Mail Legal Flat Rate Envelope"),
            ("47", "Priority Mail Regional Rate Box A"),
            ("49", "Priority Mail Regional Rate Box B"),
            ("61", "First-Class Package Service"),
        ]
        .into_iter()
        .collect();

        UspsCodeTable { classes }
    }

    /// Mail class description; empty when the CLASSID is unknown
    pub fn class_name(&self, class_id: &str) -> &'static str {
        self.classes.get(class_id.trim()).copied().unwrap_or_default()
    }
}

impl Default for UspsCodeTable {
    fn default() -> Self {
        Self::new()
    }
}
