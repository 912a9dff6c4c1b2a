//! Domain types and models

pub mod estimate;
pub mod shipment;

pub use estimate::{Estimate, Label, Provider, PurchasedShipment};
pub use shipment::{Address, Dimensions, Package, ReferenceNumber, Shipment, Weight};
