//! Fleet service implementing the car driving ports.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CarCommand, CarDeletion, CarQuery, CarRepository, CarRepositoryError,
};
use crate::domain::{
    CAR_YEAR_MAX, CAR_YEAR_MIN, Car, CarDraft, CarFilter, CarId, CarInput, CarValidationError,
    Error,
};

pub(crate) const DUPLICATE_PLATE_MESSAGE: &str = "A car with this license plate already exists";
const NOT_FOUND_MESSAGE: &str = "Car not found";

fn map_repository_error(error: CarRepositoryError) -> Error {
    match error {
        CarRepositoryError::DuplicateLicensePlate => Error::conflict(DUPLICATE_PLATE_MESSAGE),
        CarRepositoryError::Connection { message } => {
            Error::internal(format!("car repository unavailable: {message}"))
        }
        CarRepositoryError::Query { message } => {
            Error::internal(format!("car repository error: {message}"))
        }
    }
}

fn map_validation_error(error: CarValidationError) -> Error {
    match error {
        CarValidationError::YearOutOfRange { .. } => Error::invalid_request(format!(
            "Year must be between {CAR_YEAR_MIN} and {CAR_YEAR_MAX}"
        )),
        CarValidationError::InvalidMileage => {
            Error::invalid_request("Mileage must be a non-negative integer")
        }
        CarValidationError::MissingBrand
        | CarValidationError::MissingModel
        | CarValidationError::MissingYear
        | CarValidationError::MissingLicensePlate => {
            Error::invalid_request("Brand, model, year, and license plate are required")
        }
    }
}

/// Car service implementing [`CarCommand`] and [`CarQuery`].
#[derive(Clone)]
pub struct CarService<R> {
    car_repo: Arc<R>,
}

impl<R> CarService<R> {
    /// Create a service backed by the car repository.
    pub fn new(car_repo: Arc<R>) -> Self {
        Self { car_repo }
    }
}

#[async_trait]
impl<R> CarCommand for CarService<R>
where
    R: CarRepository,
{
    async fn create_car(&self, input: CarInput) -> Result<Car, Error> {
        let draft = CarDraft::try_from(input).map_err(map_validation_error)?;
        self.car_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update_car(&self, id: CarId, input: CarInput) -> Result<Car, Error> {
        let draft = CarDraft::try_from(input).map_err(map_validation_error)?;
        self.car_repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn delete_car(&self, id: CarId) -> Result<(), Error> {
        let outcome = self
            .car_repo
            .delete_unless_rented(id)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            CarDeletion::Deleted => Ok(()),
            CarDeletion::NotFound => Err(Error::not_found(NOT_FOUND_MESSAGE)),
            CarDeletion::HasActiveRentals => {
                Err(Error::conflict("Cannot delete car with active rentals"))
            }
            CarDeletion::HasRentalHistory => {
                Err(Error::conflict("Cannot delete car with rental history"))
            }
        }
    }
}

#[async_trait]
impl<R> CarQuery for CarService<R>
where
    R: CarRepository,
{
    async fn list_cars(&self, filter: CarFilter) -> Result<Vec<Car>, Error> {
        self.car_repo
            .list(&filter)
            .await
            .map_err(map_repository_error)
    }

    async fn get_car(&self, id: CarId) -> Result<Car, Error> {
        self.car_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }
}
