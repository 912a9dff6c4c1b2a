//! UPS Carrier Module
//!
//! Rating (single service and shop), label purchase, and the UPS code
//! tables over the UPS XML API.
//!
//! API Documentation: https://www.ups.com/upsdeveloperkit

mod client;
pub mod codes;
mod mapper;
pub mod models;
pub mod validate;

pub use client::{UpsCarrier, UpsEndpoints};
pub use codes::{CustomerClassification, PackagingType, PickupType, ServiceCode, UpsCodeTable};
pub use mapper::UpsMapper;
