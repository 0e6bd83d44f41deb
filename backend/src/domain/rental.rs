//! Rental transaction data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::car::{Car, CarId, checked_mileage};
use super::customer::{Customer, CustomerId};
use super::record_id::define_record_id;

define_record_id! {
    /// Store-generated rental identifier.
    RentalId
}

/// Lifecycle status of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    /// The vehicle has not been returned yet.
    Active,
    Completed,
    Cancelled,
}

impl RentalStatus {
    /// Stable storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string does not name a known [`RentalStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rental status: {0}")]
pub struct UnknownRentalStatus(pub String);

impl FromStr for RentalStatus {
    type Err = UnknownRentalStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(UnknownRentalStatus(value.to_owned())),
        }
    }
}

/// Persisted rental record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[schema(value_type = i32, example = 1)]
    pub id: RentalId,
    #[schema(value_type = i32, example = 1)]
    pub customer_id: CustomerId,
    #[schema(value_type = i32, example = 1)]
    pub car_id: CarId,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: i32,
    pub end_mileage: Option<i32>,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rental joined with the rented car, as shown in a customer's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalWithCar {
    #[serde(flatten)]
    pub rental: Rental,
    pub car: Car,
}

/// Rental joined with both its customer and its car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetails {
    #[serde(flatten)]
    pub rental: Rental,
    pub customer: Customer,
    pub car: Car,
}

/// Validation errors for rental start and return input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RentalValidationError {
    /// Customer id missing or not positive.
    #[error("customer is required")]
    MissingCustomer,
    /// Car id missing or not positive.
    #[error("car is required")]
    MissingCar,
    /// End mileage not supplied.
    #[error("end mileage is required")]
    MissingEndMileage,
    /// End mileage negative or too large to store.
    #[error("end mileage must be a non-negative integer")]
    InvalidEndMileage,
}

/// Raw input for starting a rental.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalInput {
    pub customer_id: Option<i32>,
    pub car_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
}

/// Validated request to start a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRental {
    pub customer_id: CustomerId,
    pub car_id: CarId,
    pub start_date: DateTime<Utc>,
}

impl NewRental {
    /// Validate input, defaulting the start date to `now`.
    pub fn try_from_input(
        input: RentalInput,
        now: DateTime<Utc>,
    ) -> Result<Self, RentalValidationError> {
        let customer_id = input
            .customer_id
            .and_then(|raw| CustomerId::new(raw).ok())
            .ok_or(RentalValidationError::MissingCustomer)?;
        let car_id = input
            .car_id
            .and_then(|raw| CarId::new(raw).ok())
            .ok_or(RentalValidationError::MissingCar)?;
        Ok(Self {
            customer_id,
            car_id,
            start_date: input.start_date.unwrap_or(now),
        })
    }
}

/// Raw input for returning a rented car.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalReturnInput {
    pub end_mileage: Option<i64>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Validated vehicle return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalReturn {
    pub end_mileage: i32,
    pub end_date: DateTime<Utc>,
}

impl RentalReturn {
    /// Validate input, defaulting the end date to `now`.
    pub fn try_from_input(
        input: RentalReturnInput,
        now: DateTime<Utc>,
    ) -> Result<Self, RentalValidationError> {
        let raw = input
            .end_mileage
            .ok_or(RentalValidationError::MissingEndMileage)?;
        let end_mileage = checked_mileage(raw).ok_or(RentalValidationError::InvalidEndMileage)?;
        Ok(Self {
            end_mileage,
            end_date: input.end_date.unwrap_or(now),
        })
    }
}

/// Filter for listing rentals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RentalFilter {
    pub status: Option<RentalStatus>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn new_rental_defaults_start_date() {
        let rental = NewRental::try_from_input(
            RentalInput {
                customer_id: Some(1),
                car_id: Some(2),
                start_date: None,
            },
            now(),
        )
        .expect("valid rental");
        assert_eq!(rental.start_date, now());
        assert_eq!(rental.car_id.get(), 2);
    }

    #[rstest]
    #[case(RentalInput { customer_id: None, car_id: Some(1), start_date: None }, RentalValidationError::MissingCustomer)]
    #[case(RentalInput { customer_id: Some(0), car_id: Some(1), start_date: None }, RentalValidationError::MissingCustomer)]
    #[case(RentalInput { customer_id: Some(1), car_id: None, start_date: None }, RentalValidationError::MissingCar)]
    fn new_rental_requires_positive_references(
        #[case] input: RentalInput,
        #[case] expected: RentalValidationError,
    ) {
        assert_eq!(NewRental::try_from_input(input, now()), Err(expected));
    }

    #[rstest]
    #[case(None, RentalValidationError::MissingEndMileage)]
    #[case(Some(-5), RentalValidationError::InvalidEndMileage)]
    fn rental_return_validates_mileage(
        #[case] end_mileage: Option<i64>,
        #[case] expected: RentalValidationError,
    ) {
        let input = RentalReturnInput {
            end_mileage,
            end_date: None,
        };
        assert_eq!(RentalReturn::try_from_input(input, now()), Err(expected));
    }

    #[rstest]
    fn rental_status_round_trips_through_storage_text() {
        for status in [
            RentalStatus::Active,
            RentalStatus::Completed,
            RentalStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<RentalStatus>(), Ok(status));
        }
    }
}
