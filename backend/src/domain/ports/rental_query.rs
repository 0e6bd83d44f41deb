//! Driving port for rental reads.

use async_trait::async_trait;

use crate::domain::{Error, RentalDetails, RentalFilter, RentalId};

#[async_trait]
pub trait RentalQuery: Send + Sync {
    async fn list_rentals(&self, filter: RentalFilter) -> Result<Vec<RentalDetails>, Error>;

    async fn get_rental(&self, id: RentalId) -> Result<RentalDetails, Error>;
}
