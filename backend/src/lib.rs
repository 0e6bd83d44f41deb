//! Car rental back office: customers, fleet, and rental lifecycle over a
//! JSON HTTP API.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, ports,
//! and services; [`inbound::http`] adapts them to actix-web; and
//! [`outbound::persistence`] implements the driven ports with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
