//! Driving port for the rental lifecycle.
//!
//! A rental is opened against an available car and closed exactly once,
//! either by completing it with a return reading or by cancelling it.

use async_trait::async_trait;

use crate::domain::{Error, Rental, RentalId, RentalInput, RentalReturnInput};

#[async_trait]
pub trait RentalCommand: Send + Sync {
    /// Start a rental and mark the car as rented.
    async fn start_rental(&self, input: RentalInput) -> Result<Rental, Error>;

    /// Complete an active rental and release the car.
    async fn complete_rental(
        &self,
        id: RentalId,
        input: RentalReturnInput,
    ) -> Result<Rental, Error>;

    /// Cancel an active rental and release the car.
    async fn cancel_rental(&self, id: RentalId) -> Result<Rental, Error>;
}
