//! FedEx Carrier Module
//!
//! Placeholder so FedEx can be listed alongside the other carriers. Every
//! operation reports `Unsupported` without touching the network.

use async_trait::async_trait;

use crate::carriers::traits::{
    CarrierError, CarrierResult, Operation, OperationError, ShippingCarrier,
};
use crate::domain::{Estimate, Provider, Shipment};

/// FedEx carrier stub
#[derive(Debug, Default)]
pub struct FedExCarrier;

impl FedExCarrier {
    pub fn new() -> Self {
        FedExCarrier
    }

    fn unsupported(operation: Operation) -> OperationError {
        OperationError::new(Provider::FedEx, operation, CarrierError::Unsupported)
    }
}

#[async_trait]
impl ShippingCarrier for FedExCarrier {
    fn provider(&self) -> Provider {
        Provider::FedEx
    }

    async fn rate(&self, _shipment: &Shipment) -> CarrierResult<Estimate> {
        Err(Self::unsupported(Operation::Rate))
    }

    async fn shop(&self, _shipment: &Shipment) -> CarrierResult<Vec<Estimate>> {
        Err(Self::unsupported(Operation::Shop))
    }
}
