//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call.
//! Driven ports (`*Repository`, [`StoreProbe`]) are what outbound adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod car_command;
mod car_query;
mod car_repository;
mod customer_command;
mod customer_query;
mod customer_repository;
mod rental_command;
mod rental_query;
mod rental_repository;
mod store_probe;

pub use car_command::CarCommand;
pub use car_query::CarQuery;
#[cfg(test)]
pub use car_repository::MockCarRepository;
pub use car_repository::{CarDeletion, CarRepository, CarRepositoryError};
pub use customer_command::CustomerCommand;
pub use customer_query::CustomerQuery;
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerDeletion, CustomerRepository, CustomerRepositoryError};
pub use rental_command::RentalCommand;
pub use rental_query::RentalQuery;
#[cfg(test)]
pub use rental_repository::MockRentalRepository;
pub use rental_repository::{
    RentalClosure, RentalRepository, RentalRepositoryError, RentalStart,
};
#[cfg(test)]
pub use store_probe::MockStoreProbe;
pub use store_probe::{StoreProbe, StoreProbeError};
