//! Port abstraction for rental persistence adapters.
//!
//! Starting, completing, and cancelling a rental touch both the rental and
//! the car row; adapters must apply each of these as a single transaction.

use async_trait::async_trait;

use crate::domain::{
    CarStatus, NewRental, Rental, RentalDetails, RentalFilter, RentalId, RentalReturn,
    RentalStatus,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by rental repository adapters.
    pub enum RentalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rental repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rental repository query failed: {message}",
    }
}

/// Result of attempting to start a rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalStart {
    /// The rental was recorded and the car marked rented.
    Started(Rental),
    /// No customer has the requested id.
    CustomerNotFound,
    /// No car has the requested id.
    CarNotFound,
    /// The car is not in [`CarStatus::Available`].
    CarUnavailable(CarStatus),
}

/// Result of attempting to complete or cancel a rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalClosure {
    /// The rental was closed and the car released.
    Closed(Rental),
    /// No rental has the requested id.
    NotFound,
    /// The rental was already completed or cancelled.
    NotActive(RentalStatus),
    /// The reported end mileage is below the odometer reading at start.
    MileageBelowStart { start_mileage: i32 },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// List rentals with customer and car, newest start date first.
    async fn list(&self, filter: &RentalFilter) -> Result<Vec<RentalDetails>, RentalRepositoryError>;

    /// Fetch a rental with customer and car.
    async fn find_by_id(&self, id: RentalId) -> Result<Option<RentalDetails>, RentalRepositoryError>;

    /// Open an active rental and mark the car as rented.
    async fn start(&self, rental: &NewRental) -> Result<RentalStart, RentalRepositoryError>;

    /// Close an active rental as completed, recording the return.
    async fn complete(
        &self,
        id: RentalId,
        rental_return: &RentalReturn,
    ) -> Result<RentalClosure, RentalRepositoryError>;

    /// Close an active rental as cancelled.
    async fn cancel(&self, id: RentalId) -> Result<RentalClosure, RentalRepositoryError>;
}
