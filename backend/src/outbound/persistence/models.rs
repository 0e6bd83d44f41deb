//! Internal Diesel row models.
//!
//! Rows mirror the tables in `schema.rs` and never leave the persistence
//! layer. Conversion into domain records validates identifiers and status
//! text, so a corrupt row surfaces as a query error rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Car, CarDraft, CarId, CarStatus, Customer, CustomerDraft, CustomerId, Rental, RentalId,
    RentalStatus,
};

use super::schema::{cars, customers, rentals};

/// Raised when a stored row cannot be represented as a domain record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {column} in stored row: {message}")]
pub(crate) struct CorruptRow {
    column: &'static str,
    message: String,
}

impl CorruptRow {
    fn new(column: &'static str, error: impl std::fmt::Display) -> Self {
        Self {
            column,
            message: error.to_string(),
        }
    }
}

// Customers

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = CorruptRow;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(row.id).map_err(|err| CorruptRow::new("customers.id", err))?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Full set of writable customer columns.
///
/// Used for both inserts and updates. `None` writes `NULL`, so an update
/// clears optional fields that the client omitted.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CustomerWriteRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

impl<'a> From<&'a CustomerDraft> for CustomerWriteRow<'a> {
    fn from(draft: &'a CustomerDraft) -> Self {
        Self {
            first_name: draft.first_name(),
            last_name: draft.last_name(),
            email: draft.email(),
            phone: draft.phone(),
            address: draft.address(),
        }
    }
}

// Cars

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CarRow {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub color: Option<String>,
    pub mileage: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CarRow> for Car {
    type Error = CorruptRow;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CarId::new(row.id).map_err(|err| CorruptRow::new("cars.id", err))?,
            brand: row.brand,
            model: row.model,
            year: row.year,
            license_plate: row.license_plate,
            color: row.color,
            mileage: row.mileage,
            status: row
                .status
                .parse::<CarStatus>()
                .map_err(|err| CorruptRow::new("cars.status", err))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = cars)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CarWriteRow<'a> {
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub license_plate: &'a str,
    pub color: Option<&'a str>,
    pub mileage: i32,
    pub status: &'static str,
}

impl<'a> From<&'a CarDraft> for CarWriteRow<'a> {
    fn from(draft: &'a CarDraft) -> Self {
        Self {
            brand: draft.brand(),
            model: draft.model(),
            year: draft.year(),
            license_plate: draft.license_plate(),
            color: draft.color(),
            mileage: draft.mileage(),
            status: draft.status().as_str(),
        }
    }
}

// Rentals

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RentalRow {
    pub id: i32,
    pub customer_id: i32,
    pub car_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_mileage: i32,
    pub end_mileage: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RentalRow {
    pub fn parsed_status(&self) -> Result<RentalStatus, CorruptRow> {
        self.status
            .parse::<RentalStatus>()
            .map_err(|err| CorruptRow::new("rentals.status", err))
    }
}

impl TryFrom<RentalRow> for Rental {
    type Error = CorruptRow;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        let status = row.parsed_status()?;
        Ok(Self {
            id: RentalId::new(row.id).map_err(|err| CorruptRow::new("rentals.id", err))?,
            customer_id: CustomerId::new(row.customer_id)
                .map_err(|err| CorruptRow::new("rentals.customer_id", err))?,
            car_id: CarId::new(row.car_id).map_err(|err| CorruptRow::new("rentals.car_id", err))?,
            start_date: row.start_date,
            end_date: row.end_date,
            start_mileage: row.start_mileage,
            end_mileage: row.end_mileage,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rentals)]
pub(crate) struct NewRentalRow {
    pub customer_id: i32,
    pub car_id: i32,
    pub start_date: DateTime<Utc>,
    pub start_mileage: i32,
    pub status: &'static str,
}
