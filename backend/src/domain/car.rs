//! Fleet vehicle data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::customer::required;
use super::record_id::define_record_id;

define_record_id! {
    /// Store-generated car identifier.
    CarId
}

/// Earliest model year accepted for a car.
pub const CAR_YEAR_MIN: i64 = 1900;
/// Latest model year accepted for a car.
pub const CAR_YEAR_MAX: i64 = 2100;

/// Operational status of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
    Unavailable,
}

impl CarStatus {
    /// Stable storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Rented => "RENTED",
            Self::Maintenance => "MAINTENANCE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string does not name a known [`CarStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown car status: {0}")]
pub struct UnknownCarStatus(pub String);

impl FromStr for CarStatus {
    type Err = UnknownCarStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "RENTED" => Ok(Self::Rented),
            "MAINTENANCE" => Ok(Self::Maintenance),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            _ => Err(UnknownCarStatus(value.to_owned())),
        }
    }
}

/// Persisted car record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[schema(value_type = i32, example = 1)]
    pub id: CarId,
    #[schema(example = "Toyota")]
    pub brand: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 2021)]
    pub year: i32,
    #[schema(example = "AB-123-CD")]
    pub license_plate: String,
    pub color: Option<String>,
    pub mileage: i32,
    pub status: CarStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validation errors returned when building a [`CarDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CarValidationError {
    /// Brand missing or blank.
    #[error("brand must not be empty")]
    MissingBrand,
    /// Model missing or blank.
    #[error("model must not be empty")]
    MissingModel,
    /// Model year not supplied.
    #[error("year is required")]
    MissingYear,
    /// Licence plate missing or blank.
    #[error("license plate must not be empty")]
    MissingLicensePlate,
    /// Model year outside the accepted range.
    #[error("year must be between {min} and {max}")]
    YearOutOfRange { min: i64, max: i64 },
    /// Negative mileage, or too large to store.
    #[error("mileage must be a non-negative integer")]
    InvalidMileage,
}

/// Raw car fields as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarInput {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub status: Option<CarStatus>,
}

/// Validated car fields ready to be written.
///
/// Mileage defaults to zero and status to [`CarStatus::Available`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    brand: String,
    model: String,
    year: i32,
    license_plate: String,
    color: Option<String>,
    mileage: i32,
    status: CarStatus,
}

impl CarDraft {
    /// Trimmed brand.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Trimmed model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Trimmed licence plate.
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Colour, absent when blank.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Odometer reading in kilometres.
    pub fn mileage(&self) -> i32 {
        self.mileage
    }

    /// Requested operational status.
    pub fn status(&self) -> CarStatus {
        self.status
    }
}

fn checked_year(year: i64) -> Result<i32, CarValidationError> {
    if !(CAR_YEAR_MIN..=CAR_YEAR_MAX).contains(&year) {
        return Err(CarValidationError::YearOutOfRange {
            min: CAR_YEAR_MIN,
            max: CAR_YEAR_MAX,
        });
    }
    i32::try_from(year).map_err(|_| CarValidationError::YearOutOfRange {
        min: CAR_YEAR_MIN,
        max: CAR_YEAR_MAX,
    })
}

/// Convert a client-supplied odometer reading into the stored representation.
pub(crate) fn checked_mileage(mileage: i64) -> Option<i32> {
    i32::try_from(mileage).ok().filter(|value| *value >= 0)
}

impl TryFrom<CarInput> for CarDraft {
    type Error = CarValidationError;

    fn try_from(value: CarInput) -> Result<Self, Self::Error> {
        let CarInput {
            brand,
            model,
            year,
            license_plate,
            color,
            mileage,
            status,
        } = value;

        let brand = required(brand).ok_or(CarValidationError::MissingBrand)?;
        let model = required(model).ok_or(CarValidationError::MissingModel)?;
        let year = year.ok_or(CarValidationError::MissingYear)?;
        let license_plate =
            required(license_plate).ok_or(CarValidationError::MissingLicensePlate)?;
        let mileage = match mileage {
            Some(raw) => checked_mileage(raw).ok_or(CarValidationError::InvalidMileage)?,
            None => 0,
        };

        Ok(Self {
            brand,
            model,
            year: checked_year(year)?,
            license_plate,
            color: required(color),
            mileage,
            status: status.unwrap_or(CarStatus::Available),
        })
    }
}

/// Filter for listing cars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub status: Option<CarStatus>,
}

impl CarFilter {
    /// Whether `car` passes the status filter.
    pub fn matches(&self, car: &Car) -> bool {
        self.status.is_none_or(|status| car.status == status)
    }
}
