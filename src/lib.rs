//! Shipping Rates
//!
//! Rate, shop, and label purchase against multiple shipping carriers (UPS,
//! USPS, and a FedEx placeholder) through one `ShippingCarrier` trait.

pub mod carriers;
pub mod config;
pub mod domain;

pub use carriers::{
    CarrierError, CarrierFactory, CarrierResult, HttpTransport, OperationError, ShippingCarrier,
    Transport,
};
pub use config::Settings;
pub use domain::{
    Address, Dimensions, Estimate, Package, Provider, PurchasedShipment, Shipment, Weight,
};
