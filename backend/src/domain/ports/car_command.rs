//! Driving port for fleet mutations.

use async_trait::async_trait;

use crate::domain::{Car, CarId, CarInput, Error};

#[async_trait]
pub trait CarCommand: Send + Sync {
    async fn create_car(&self, input: CarInput) -> Result<Car, Error>;

    async fn update_car(&self, id: CarId, input: CarInput) -> Result<Car, Error>;

    /// Remove a car that no rental references.
    async fn delete_car(&self, id: CarId) -> Result<(), Error>;
}
