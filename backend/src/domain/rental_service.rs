//! Rental lifecycle service.
//!
//! Validates rental requests and maps repository outcomes onto domain
//! errors. The repository applies each transition, together with the
//! matching car status change, in a single transaction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    RentalClosure, RentalCommand, RentalQuery, RentalRepository, RentalRepositoryError,
    RentalStart,
};
use crate::domain::{
    Error, NewRental, Rental, RentalDetails, RentalFilter, RentalId, RentalInput, RentalReturn,
    RentalReturnInput, RentalValidationError,
};

const NOT_FOUND_MESSAGE: &str = "Rental not found";
const NOT_ACTIVE_MESSAGE: &str = "Rental is not active";

fn map_repository_error(error: RentalRepositoryError) -> Error {
    match error {
        RentalRepositoryError::Connection { message } => {
            Error::internal(format!("rental repository unavailable: {message}"))
        }
        RentalRepositoryError::Query { message } => {
            Error::internal(format!("rental repository error: {message}"))
        }
    }
}

fn map_validation_error(error: RentalValidationError) -> Error {
    match error {
        RentalValidationError::MissingCustomer | RentalValidationError::MissingCar => {
            Error::invalid_request("Customer ID and car ID are required")
        }
        RentalValidationError::MissingEndMileage | RentalValidationError::InvalidEndMileage => {
            Error::invalid_request("End mileage must be a non-negative integer")
        }
    }
}

fn closed_rental(outcome: RentalClosure) -> Result<Rental, Error> {
    match outcome {
        RentalClosure::Closed(rental) => Ok(rental),
        RentalClosure::NotFound => Err(Error::not_found(NOT_FOUND_MESSAGE)),
        RentalClosure::NotActive(_) => Err(Error::conflict(NOT_ACTIVE_MESSAGE)),
        RentalClosure::MileageBelowStart { start_mileage } => Err(Error::invalid_request(
            format!("End mileage cannot be less than start mileage ({start_mileage})"),
        )),
    }
}

/// Rental service implementing [`RentalCommand`] and [`RentalQuery`].
#[derive(Clone)]
pub struct RentalService<R> {
    rental_repo: Arc<R>,
}

impl<R> RentalService<R> {
    /// Create a service backed by the rental repository.
    pub fn new(rental_repo: Arc<R>) -> Self {
        Self { rental_repo }
    }
}

#[async_trait]
impl<R> RentalCommand for RentalService<R>
where
    R: RentalRepository,
{
    async fn start_rental(&self, input: RentalInput) -> Result<Rental, Error> {
        let request = NewRental::try_from_input(input, Utc::now()).map_err(map_validation_error)?;
        let outcome = self
            .rental_repo
            .start(&request)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            RentalStart::Started(rental) => Ok(rental),
            RentalStart::CustomerNotFound => Err(Error::not_found("Customer not found")),
            RentalStart::CarNotFound => Err(Error::not_found("Car not found")),
            RentalStart::CarUnavailable(status) => {
                tracing::debug!(car_id = %request.car_id, %status, "car unavailable for rental");
                Err(Error::conflict("Car is not available"))
            }
        }
    }

    async fn complete_rental(
        &self,
        id: RentalId,
        input: RentalReturnInput,
    ) -> Result<Rental, Error> {
        let rental_return =
            RentalReturn::try_from_input(input, Utc::now()).map_err(map_validation_error)?;
        let outcome = self
            .rental_repo
            .complete(id, &rental_return)
            .await
            .map_err(map_repository_error)?;
        closed_rental(outcome)
    }

    async fn cancel_rental(&self, id: RentalId) -> Result<Rental, Error> {
        let outcome = self
            .rental_repo
            .cancel(id)
            .await
            .map_err(map_repository_error)?;
        closed_rental(outcome)
    }
}

#[async_trait]
impl<R> RentalQuery for RentalService<R>
where
    R: RentalRepository,
{
    async fn list_rentals(&self, filter: RentalFilter) -> Result<Vec<RentalDetails>, Error> {
        self.rental_repo
            .list(&filter)
            .await
            .map_err(map_repository_error)
    }

    async fn get_rental(&self, id: RentalId) -> Result<RentalDetails, Error> {
        self.rental_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "rental_service_tests.rs"]
mod tests;
