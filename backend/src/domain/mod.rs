//! Domain primitives, ports, and services.
//!
//! Purpose: define the rental back office's entities and the rules that
//! govern them, independent of HTTP and persistence. Inbound adapters call
//! the driving ports in [`ports`]; outbound adapters implement the driven
//! ports.
//!
//! Public surface:
//! - Error / ErrorCode: domain failure with a stable transport mapping.
//! - Customer, Car, Rental: persisted records and their validated drafts.
//! - CustomerService, CarService, RentalService: port implementations.

pub mod car;
pub mod car_service;
pub mod customer;
pub mod customer_service;
pub mod error;
pub mod ports;
pub mod record_id;
pub mod rental;
pub mod rental_service;

pub use self::car::{
    CAR_YEAR_MAX, CAR_YEAR_MIN, Car, CarDraft, CarFilter, CarId, CarInput, CarStatus,
    CarValidationError, UnknownCarStatus,
};
pub use self::car_service::CarService;
pub use self::customer::{
    Customer, CustomerDetails, CustomerDraft, CustomerFilter, CustomerId, CustomerInput,
    CustomerValidationError,
};
pub use self::customer_service::CustomerService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::record_id::RecordIdError;
pub use self::rental::{
    NewRental, Rental, RentalDetails, RentalFilter, RentalId, RentalInput, RentalReturn,
    RentalReturnInput, RentalStatus, RentalValidationError, RentalWithCar, UnknownRentalStatus,
};
pub use self::rental_service::RentalService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use rental_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("Customer not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
