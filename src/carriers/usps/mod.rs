//! USPS Carrier Module
//!
//! Domestic rating over the USPS Web Tools RateV4 API.
//!
//! API Documentation: https://www.usps.com/business/web-tools-apis/

mod client;
pub mod codes;
mod mapper;
pub mod models;
pub mod validate;

pub use client::{UspsCarrier, DEFAULT_URL};
pub use codes::{Container, FirstClassMailType, MailService, UspsCodeTable};
pub use mapper::UspsMapper;
