//! HTTP inbound adapter exposing the REST API.

pub mod cars;
pub mod customers;
pub mod error;
pub mod health;
pub mod rentals;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the customer, car, and rental routes at the application root,
/// together with extractor configuration that keeps rejected payloads in the
/// `{message}` shape.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use rental_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .service(customers::list_customers)
        .service(customers::create_customer)
        .service(customers::get_customer)
        .service(customers::update_customer)
        .service(customers::delete_customer)
        .service(cars::list_cars)
        .service(cars::create_car)
        .service(cars::get_car)
        .service(cars::update_car)
        .service(cars::delete_car)
        .service(rentals::list_rentals)
        .service(rentals::start_rental)
        .service(rentals::get_rental)
        .service(rentals::complete_rental)
        .service(rentals::cancel_rental);
}
