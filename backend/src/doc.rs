//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the record and request schemas they exchange. The generated document
//! is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{
    Car, CarStatus, Customer, CustomerDetails, Rental, RentalDetails, RentalStatus, RentalWithCar,
};
use crate::inbound::http::cars::CarRequest;
use crate::inbound::http::customers::{CustomerRequest, DeleteResponse};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::rentals::{RentalRequest, RentalReturnRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Car rental back office API",
        description = "CRUD over customers and the fleet, plus the rental lifecycle."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::get_customer,
        crate::inbound::http::customers::update_customer,
        crate::inbound::http::customers::delete_customer,
        crate::inbound::http::cars::list_cars,
        crate::inbound::http::cars::create_car,
        crate::inbound::http::cars::get_car,
        crate::inbound::http::cars::update_car,
        crate::inbound::http::cars::delete_car,
        crate::inbound::http::rentals::list_rentals,
        crate::inbound::http::rentals::start_rental,
        crate::inbound::http::rentals::get_rental,
        crate::inbound::http::rentals::complete_rental,
        crate::inbound::http::rentals::cancel_rental,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Customer,
        CustomerDetails,
        CustomerRequest,
        Car,
        CarStatus,
        CarRequest,
        Rental,
        RentalStatus,
        RentalWithCar,
        RentalDetails,
        RentalRequest,
        RentalReturnRequest,
        DeleteResponse,
        ErrorBody,
    )),
    tags(
        (name = "customers", description = "Customer records and rental history"),
        (name = "cars", description = "Fleet inventory"),
        (name = "rentals", description = "Starting, returning, and cancelling rentals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
