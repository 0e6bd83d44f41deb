//! Driving port for fleet reads.

use async_trait::async_trait;

use crate::domain::{Car, CarFilter, CarId, Error};

#[async_trait]
pub trait CarQuery: Send + Sync {
    async fn list_cars(&self, filter: CarFilter) -> Result<Vec<Car>, Error>;

    async fn get_car(&self, id: CarId) -> Result<Car, Error>;
}
