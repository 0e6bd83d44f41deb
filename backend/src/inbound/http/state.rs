//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CarCommand, CarQuery, CustomerCommand, CustomerQuery, RentalCommand, RentalQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub customers: Arc<dyn CustomerCommand>,
    pub customers_query: Arc<dyn CustomerQuery>,
    pub cars: Arc<dyn CarCommand>,
    pub cars_query: Arc<dyn CarQuery>,
    pub rentals: Arc<dyn RentalCommand>,
    pub rentals_query: Arc<dyn RentalQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub customers: Arc<dyn CustomerCommand>,
    pub customers_query: Arc<dyn CustomerQuery>,
    pub cars: Arc<dyn CarCommand>,
    pub cars_query: Arc<dyn CarQuery>,
    pub rentals: Arc<dyn RentalCommand>,
    pub rentals_query: Arc<dyn RentalQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            customers,
            customers_query,
            cars,
            cars_query,
            rentals,
            rentals_query,
        } = ports;
        Self {
            customers,
            customers_query,
            cars,
            cars_query,
            rentals,
            rentals_query,
        }
    }
}
