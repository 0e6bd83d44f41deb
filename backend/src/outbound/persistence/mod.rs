//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel row models and domain
//! records; row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use rental_backend::outbound::persistence::{DbPool, DieselCustomerRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rental")).await?;
//! let customers = DieselCustomerRepository::new(pool);
//! # let _ = customers;
//! # Ok(())
//! # }
//! ```

mod diesel_car_repository;
mod diesel_customer_repository;
mod diesel_error_mapping;
mod diesel_rental_repository;
mod diesel_store_probe;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_car_repository::DieselCarRepository;
pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_rental_repository::DieselRentalRepository;
pub use diesel_store_probe::DieselStoreProbe;
pub use migrations::{MigrationError, run_pending_migrations, run_pending_migrations_blocking};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DEFAULT_POOL_MIN_IDLE, DbPool, PoolConfig, PoolError};
