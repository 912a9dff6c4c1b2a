//! Shipping Carrier Integration Module
//!
//! This module provides a unified interface for rating and buying labels
//! from multiple shipping carriers.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │  ShippingCarrier Trait   │
//!                 └────────────┬─────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          │                   │                   │
//!      ┌───┴───┐           ┌───┴───┐           ┌───┴───┐
//!      │  UPS  │           │ USPS  │           │ FedEx │
//!      └───┬───┘           └───┬───┘           └───────┘
//!          └─────────┬─────────┘
//!              ┌─────┴─────┐
//!              │ Transport │
//!              └───────────┘
//! ```
//!
//! Each call runs validate → build → send → parse → normalize.

pub mod fedex;
pub mod http_client;
pub mod traits;
pub mod ups;
pub mod usps;
pub mod xml;

// Re-export commonly used types
pub use fedex::FedExCarrier;
pub use http_client::{HttpTransport, OutboundRequest, RequestBody, Transport, TransportError};
pub use traits::{
    CarrierCredentials, CarrierError, CarrierFactory, CarrierResult, Operation, OperationError,
    RateMode, ShippingCarrier, ValidationError,
};
pub use ups::{UpsCarrier, UpsEndpoints};
pub use usps::UspsCarrier;
