//! UPS code tables
//!
//! Packaging, pickup, and service codes from the UPS XML API. The enums give
//! callers typed codes; `UpsCodeTable` is the read-only description lookup
//! shared across requests.

use std::collections::HashMap;

use crate::carriers::traits::ValidationError;

/// UPS packaging type. If none is given UPS assumes `Package` ("02").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackagingType {
    Unknown,
    UpsLetter,
    Package,
    Tube,
    Pak,
    ExpressBox,
    Box25Kg,
    Box10Kg,
    Pallet,
    SmallExpressBox,
    MediumExpressBox,
    LargeExpressBox,
}

impl PackagingType {
    pub const ALL: [PackagingType; 12] = [
        PackagingType::Unknown,
        PackagingType::UpsLetter,
        PackagingType::Package,
        PackagingType::Tube,
        PackagingType::Pak,
        PackagingType::ExpressBox,
        PackagingType::Box25Kg,
        PackagingType::Box10Kg,
        PackagingType::Pallet,
        PackagingType::SmallExpressBox,
        PackagingType::MediumExpressBox,
        PackagingType::LargeExpressBox,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PackagingType::Unknown => "00",
            PackagingType::UpsLetter => "01",
            PackagingType::Package => "02",
            PackagingType::Tube => "03",
            PackagingType::Pak => "04",
            PackagingType::ExpressBox => "21",
            PackagingType::Box25Kg => "24",
            PackagingType::Box10Kg => "25",
            PackagingType::Pallet => "30",
            PackagingType::SmallExpressBox => "2a",
            PackagingType::MediumExpressBox => "2b",
            PackagingType::LargeExpressBox => "2c",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        PackagingType::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::UnknownCode {
                kind: "UPS packaging type",
                code: code.to_string(),
            })
    }

    /// Carrier-supplied packaging with fixed, known dimensions
    pub fn is_fixed_size(&self) -> bool {
        matches!(
            self,
            PackagingType::UpsLetter
                | PackagingType::Tube
                | PackagingType::Pak
                | PackagingType::ExpressBox
                | PackagingType::Box25Kg
                | PackagingType::Box10Kg
                | PackagingType::SmallExpressBox
                | PackagingType::MediumExpressBox
                | PackagingType::LargeExpressBox
        )
    }
}

/// UPS pickup type. Defaults to daily pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupType {
    Daily,
    CustomerCounter,
    OneTime,
    OnCallAir,
    LetterCenter,
    AirServiceCenter,
}

impl PickupType {
    pub const ALL: [PickupType; 6] = [
        PickupType::Daily,
        PickupType::CustomerCounter,
        PickupType::OneTime,
        PickupType::OnCallAir,
        PickupType::LetterCenter,
        PickupType::AirServiceCenter,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PickupType::Daily => "01",
            PickupType::CustomerCounter => "03",
            PickupType::OneTime => "06",
            PickupType::OnCallAir => "07",
            PickupType::LetterCenter => "19",
            PickupType::AirServiceCenter => "20",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        PickupType::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| ValidationError::UnknownCode {
                kind: "UPS pickup type",
                code: code.to_string(),
            })
    }
}

/// Rate table UPS should quote from; only sent when the caller asks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerClassification {
    ShipperNumberRates,
    DailyRates,
    RetailRates,
    StandardListRates,
}

impl CustomerClassification {
    pub const ALL: [CustomerClassification; 4] = [
        CustomerClassification::ShipperNumberRates,
        CustomerClassification::DailyRates,
        CustomerClassification::RetailRates,
        CustomerClassification::StandardListRates,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CustomerClassification::ShipperNumberRates => "00",
            CustomerClassification::DailyRates => "01",
            CustomerClassification::RetailRates => "04",
            CustomerClassification::StandardListRates => "53",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CustomerClassification::ShipperNumberRates => "Rates Associated with Shipper Number",
            CustomerClassification::DailyRates => "Daily Rates",
            CustomerClassification::RetailRates => "Retail Rates",
            CustomerClassification::StandardListRates => "Standard List Rates",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        CustomerClassification::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ValidationError::UnknownCode {
                kind: "UPS customer classification",
                code: code.to_string(),
            })
    }
}

/// UPS service. Required for rating, ignored for shopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCode {
    // Domestic
    NextDayAirEarlyAm,
    NextDayAir,
    NextDayAirSaver,
    SecondDayAirAm,
    SecondDayAir,
    ThreeDaySelect,
    Ground,

    // International
    Standard,
    WorldwideExpress,
    WorldwideExpressPlus,
    WorldwideExpedited,
    Saver,
}

impl ServiceCode {
    pub const ALL: [ServiceCode; 12] = [
        ServiceCode::NextDayAirEarlyAm,
        ServiceCode::NextDayAir,
        ServiceCode::NextDayAirSaver,
        ServiceCode::SecondDayAirAm,
        ServiceCode::SecondDayAir,
        ServiceCode::ThreeDaySelect,
        ServiceCode::Ground,
        ServiceCode::Standard,
        ServiceCode::WorldwideExpress,
        ServiceCode::WorldwideExpressPlus,
        ServiceCode::WorldwideExpedited,
        ServiceCode::Saver,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ServiceCode::NextDayAirEarlyAm => "14",
            ServiceCode::NextDayAir => "01",
            ServiceCode::NextDayAirSaver => "13",
            ServiceCode::SecondDayAirAm => "59",
            ServiceCode::SecondDayAir => "02",
            ServiceCode::ThreeDaySelect => "12",
            ServiceCode::Ground => "03",
            ServiceCode::Standard => "11",
            ServiceCode::WorldwideExpress => "07",
            ServiceCode::WorldwideExpressPlus => "54",
            ServiceCode::WorldwideExpedited => "08",
            ServiceCode::Saver => "65",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        ServiceCode::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| ValidationError::UnknownCode {
                kind: "UPS service",
                code: code.to_string(),
            })
    }
}

impl Default for ServiceCode {
    fn default() -> Self {
        ServiceCode::Ground
    }
}

/// Read-only code → description lookup for UPS
#[derive(Debug, Clone)]
pub struct UpsCodeTable {
    packaging: HashMap<&'static str, &'static str>,
    pickup: HashMap<&'static str, &'static str>,
    services: HashMap<&'static str, &'static str>,
}

impl UpsCodeTable {
    pub fn new() -> Self {
        let packaging = PackagingType::ALL
            .into_iter()
            .map(|p| {
                let name = match p {
                    PackagingType::Unknown => "Unknown",
                    PackagingType::UpsLetter => "UPS Letter",
                    PackagingType::Package => "Package",
                    PackagingType::Tube => "Tube",
                    PackagingType::Pak => "Pak",
                    PackagingType::ExpressBox => "Express Box",
                    PackagingType::Box25Kg => "25KG Box",
                    PackagingType::Box10Kg => "10KG Box",
                    PackagingType::Pallet => "Pallet",
                    PackagingType::SmallExpressBox => "Small Express Box",
                    PackagingType::MediumExpressBox => "Medium Express Box",
                    PackagingType::LargeExpressBox => "Large Express Box",
                };
                (p.code(), name)
            })
            .collect();

        let pickup = PickupType::ALL
            .into_iter()
            .map(|p| {
                let name = match p {
                    PickupType::Daily => "Daily Pickup",
                    PickupType::CustomerCounter => "Customer Counter",
                    PickupType::OneTime => "One Time Pickup",
                    PickupType::OnCallAir => "On Call Air",
                    PickupType::LetterCenter => "Letter Center",
                    PickupType::AirServiceCenter => "Air Service Center",
                };
                (p.code(), name)
            })
            .collect();

        let services = ServiceCode::ALL
            .into_iter()
            .map(|s| {
                let name = match s {
                    ServiceCode::NextDayAirEarlyAm => "Next Day Air Early AM",
                    ServiceCode::NextDayAir => "Next Day Air",
                    ServiceCode::NextDayAirSaver => "Next Day Air Saver",
                    ServiceCode::SecondDayAirAm => "2nd Day Air AM",
                    ServiceCode::SecondDayAir => "2nd Day Air",
                    ServiceCode::ThreeDaySelect => "3 Day Select",
                    ServiceCode::Ground => "Ground",
                    ServiceCode::Standard => "International Standard",
                    ServiceCode::WorldwideExpress => "Worldwide Express",
                    ServiceCode::WorldwideExpressPlus => "Worldwide Express Plus",
                    ServiceCode::WorldwideExpedited => "Worldwide Expedited",
                    ServiceCode::Saver => "International Saver",
                };
                (s.code(), name)
            })
            .collect();

        UpsCodeTable {
            packaging,
            pickup,
            services,
        }
    }

    /// Service description; empty when the code is unknown
    pub fn service_name(&self, code: &str) -> &'static str {
        self.services.get(code.trim()).copied().unwrap_or_default()
    }

    pub fn packaging_name(&self, code: &str) -> &'static str {
        self.packaging.get(code.trim()).copied().unwrap_or_default()
    }

    pub fn pickup_name(&self, code: &str) -> &'static str {
        self.pickup.get(code.trim()).copied().unwrap_or_default()
    }
}

impl Default for UpsCodeTable {
    fn default() -> Self {
        Self::new()
    }
}
