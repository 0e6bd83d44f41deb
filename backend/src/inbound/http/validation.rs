//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers, timestamps, and status filters are parsed here before
//! any port is called, so malformed input never reaches the store.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{CarId, CustomerId, Error, RecordIdError, RentalId};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn parse_id<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, RecordIdError>,
    message: &'static str,
) -> Result<T, Error> {
    parse(raw).map_err(|_| Error::invalid_request(message))
}

pub(crate) fn parse_customer_id(raw: &str) -> Result<CustomerId, Error> {
    parse_id(raw, CustomerId::parse, "Invalid customer ID")
}

pub(crate) fn parse_car_id(raw: &str) -> Result<CarId, Error> {
    parse_id(raw, CarId::parse, "Invalid car ID")
}

pub(crate) fn parse_rental_id(raw: &str) -> Result<RentalId, Error> {
    parse_id(raw, RentalId::parse, "Invalid rental ID")
}

pub(crate) fn invalid_timestamp_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} must be an RFC 3339 timestamp", field.as_str()))
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(field))
        })
        .transpose()
}

/// Parse an optional status filter, treating blank values as absent.
pub(crate) fn parse_optional_status<T: std::str::FromStr>(
    value: Option<&str>,
    message: &'static str,
) -> Result<Option<T>, Error> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.parse::<T>().map_err(|_| Error::invalid_request(message)))
        .transpose()
}

/// Turn JSON extractor failures into `{message}` responses.
pub fn json_error_handler(error: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(%error, path = req.path(), "rejected JSON payload");
    Error::invalid_request(format!("Invalid JSON body: {error}")).into()
}

/// Turn query string extractor failures into `{message}` responses.
pub fn query_error_handler(error: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(%error, path = req.path(), "rejected query string");
    Error::invalid_request(format!("Invalid query string: {error}")).into()
}
