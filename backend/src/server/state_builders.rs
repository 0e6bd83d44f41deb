//! Builders wiring Diesel repositories into services and HTTP state.

use std::sync::Arc;

use actix_web::web;

use rental_backend::domain::{CarService, CustomerService, RentalService};
use rental_backend::inbound::http::state::{HttpState, HttpStatePorts};
use rental_backend::outbound::persistence::{
    DbPool, DieselCarRepository, DieselCustomerRepository, DieselRentalRepository,
};

/// Build HTTP state with each service backed by its Diesel repository.
///
/// Every service implements both its command and query port, so one
/// instance serves both fields of the pair.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let customers = Arc::new(CustomerService::new(Arc::new(
        DieselCustomerRepository::new(pool.clone()),
    )));
    let cars = Arc::new(CarService::new(Arc::new(DieselCarRepository::new(
        pool.clone(),
    ))));
    let rentals = Arc::new(RentalService::new(Arc::new(DieselRentalRepository::new(
        pool.clone(),
    ))));

    web::Data::new(HttpState::new(HttpStatePorts {
        customers: customers.clone(),
        customers_query: customers,
        cars: cars.clone(),
        cars_query: cars,
        rentals: rentals.clone(),
        rentals_query: rentals,
    }))
}
