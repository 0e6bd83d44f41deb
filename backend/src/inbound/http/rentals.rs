//! Rental API handlers.
//!
//! ```text
//! GET  /rentals?status=ACTIVE
//! POST /rentals {"customerId":1,"carId":2}
//! GET  /rentals/{id}
//! POST /rentals/{id}/complete {"endMileage":12500}
//! POST /rentals/{id}/cancel
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Rental, RentalDetails, RentalFilter, RentalInput, RentalReturnInput, RentalStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_rfc3339_timestamp, parse_optional_status, parse_rental_id,
};

const START_DATE: FieldName = FieldName::new("startDate");
const END_DATE: FieldName = FieldName::new("endDate");

/// Request body for starting a rental.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    #[schema(example = 1)]
    pub customer_id: Option<i64>,
    #[schema(example = 1)]
    pub car_id: Option<i64>,
    /// RFC 3339 timestamp; defaults to now.
    pub start_date: Option<String>,
}

fn reference(raw: Option<i64>) -> Option<i32> {
    raw.and_then(|value| i32::try_from(value).ok())
}

impl TryFrom<RentalRequest> for RentalInput {
    type Error = Error;

    fn try_from(value: RentalRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_id: reference(value.customer_id),
            car_id: reference(value.car_id),
            start_date: parse_optional_rfc3339_timestamp(value.start_date, START_DATE)?,
        })
    }
}

/// Request body for completing a rental.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalReturnRequest {
    #[schema(example = 12500)]
    pub end_mileage: Option<i64>,
    /// RFC 3339 timestamp; defaults to now.
    pub end_date: Option<String>,
}

impl TryFrom<RentalReturnRequest> for RentalReturnInput {
    type Error = Error;

    fn try_from(value: RentalReturnRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            end_mileage: value.end_mileage,
            end_date: parse_optional_rfc3339_timestamp(value.end_date, END_DATE)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RentalListQuery {
    /// One of `ACTIVE`, `COMPLETED`, `CANCELLED`.
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/rentals",
    params(RentalListQuery),
    responses(
        (status = 200, description = "Rentals, newest start date first", body = [RentalDetails]),
        (status = 400, description = "Invalid rental status", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["rentals"],
    operation_id = "listRentals"
)]
#[get("/rentals")]
pub async fn list_rentals(
    state: web::Data<HttpState>,
    query: web::Query<RentalListQuery>,
) -> ApiResult<web::Json<Vec<RentalDetails>>> {
    let status =
        parse_optional_status::<RentalStatus>(query.status.as_deref(), "Invalid rental status")?;
    let rentals = state
        .rentals_query
        .list_rentals(RentalFilter { status })
        .await?;
    Ok(web::Json(rentals))
}

#[utoipa::path(
    post,
    path = "/rentals",
    request_body = RentalRequest,
    responses(
        (status = 201, description = "Rental started", body = Rental),
        (status = 400, description = "Invalid input or car not available", body = ErrorBody),
        (status = 404, description = "Customer or car not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["rentals"],
    operation_id = "startRental"
)]
#[post("/rentals")]
pub async fn start_rental(
    state: web::Data<HttpState>,
    payload: web::Json<RentalRequest>,
) -> ApiResult<HttpResponse> {
    let input = RentalInput::try_from(payload.into_inner())?;
    let rental = state.rentals.start_rental(input).await?;
    Ok(HttpResponse::Created().json(rental))
}

#[utoipa::path(
    get,
    path = "/rentals/{id}",
    params(("id" = i32, Path, description = "Rental identifier")),
    responses(
        (status = 200, description = "Rental with customer and car", body = RentalDetails),
        (status = 400, description = "Invalid rental ID", body = ErrorBody),
        (status = 404, description = "Rental not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["rentals"],
    operation_id = "getRental"
)]
#[get("/rentals/{id}")]
pub async fn get_rental(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RentalDetails>> {
    let id = parse_rental_id(&path)?;
    Ok(web::Json(state.rentals_query.get_rental(id).await?))
}

/// Return the car and close the rental as completed.
#[utoipa::path(
    post,
    path = "/rentals/{id}/complete",
    params(("id" = i32, Path, description = "Rental identifier")),
    request_body = RentalReturnRequest,
    responses(
        (status = 200, description = "Rental completed", body = Rental),
        (status = 400, description = "Invalid input or rental not active", body = ErrorBody),
        (status = 404, description = "Rental not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["rentals"],
    operation_id = "completeRental"
)]
#[post("/rentals/{id}/complete")]
pub async fn complete_rental(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RentalReturnRequest>,
) -> ApiResult<web::Json<Rental>> {
    let id = parse_rental_id(&path)?;
    let input = RentalReturnInput::try_from(payload.into_inner())?;
    Ok(web::Json(state.rentals.complete_rental(id, input).await?))
}

#[utoipa::path(
    post,
    path = "/rentals/{id}/cancel",
    params(("id" = i32, Path, description = "Rental identifier")),
    responses(
        (status = 200, description = "Rental cancelled", body = Rental),
        (status = 400, description = "Invalid ID or rental not active", body = ErrorBody),
        (status = 404, description = "Rental not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["rentals"],
    operation_id = "cancelRental"
)]
#[post("/rentals/{id}/cancel")]
pub async fn cancel_rental(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Rental>> {
    let id = parse_rental_id(&path)?;
    Ok(web::Json(state.rentals.cancel_rental(id).await?))
}

#[cfg(test)]
#[path = "rentals_tests.rs"]
mod tests;
