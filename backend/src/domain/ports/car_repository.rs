//! Port abstraction for car persistence adapters.

use async_trait::async_trait;

use crate::domain::{Car, CarDraft, CarFilter, CarId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by car repository adapters.
    pub enum CarRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "car repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "car repository query failed: {message}",
        /// Another car already carries the licence plate.
        DuplicateLicensePlate => "car license plate already exists",
    }
}

/// Result of a guarded car deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarDeletion {
    /// The car row was removed.
    Deleted,
    /// No car has the requested id.
    NotFound,
    /// An active rental references the car.
    HasActiveRentals,
    /// Completed or cancelled rentals still reference the car.
    HasRentalHistory,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// List cars matching the filter, ordered by brand then model.
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, CarRepositoryError>;

    /// Fetch a car by identifier.
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError>;

    /// Insert a new car and return the stored record.
    async fn insert(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError>;

    /// Overwrite every field of an existing car.
    ///
    /// While the car has an active rental its stored status and mileage are
    /// kept; the rental lifecycle owns those two fields.
    async fn update(&self, id: CarId, draft: &CarDraft) -> Result<Option<Car>, CarRepositoryError>;

    /// Delete a car unless rentals reference it.
    async fn delete_unless_rented(&self, id: CarId) -> Result<CarDeletion, CarRepositoryError>;
}
