//! Car API handlers.
//!
//! ```text
//! GET    /cars?status=AVAILABLE
//! POST   /cars {"brand":"Toyota","model":"Corolla","year":2021,"licensePlate":"AB-123-CD"}
//! GET    /cars/{id}
//! PUT    /cars/{id}
//! DELETE /cars/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Car, CarFilter, CarInput, CarStatus, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::customers::DeleteResponse;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_car_id, parse_optional_status};

const INVALID_STATUS_MESSAGE: &str = "Invalid car status";

/// Request body for creating or replacing a car.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarRequest {
    #[schema(example = "Toyota")]
    pub brand: Option<String>,
    #[schema(example = "Corolla")]
    pub model: Option<String>,
    #[schema(example = 2021)]
    pub year: Option<i64>,
    #[schema(example = "AB-123-CD")]
    pub license_plate: Option<String>,
    pub color: Option<String>,
    /// Defaults to 0.
    pub mileage: Option<i64>,
    /// Defaults to `AVAILABLE`.
    #[schema(example = "AVAILABLE")]
    pub status: Option<String>,
}

impl TryFrom<CarRequest> for CarInput {
    type Error = Error;

    fn try_from(value: CarRequest) -> Result<Self, Self::Error> {
        let status =
            parse_optional_status::<CarStatus>(value.status.as_deref(), INVALID_STATUS_MESSAGE)?;
        Ok(Self {
            brand: value.brand,
            model: value.model,
            year: value.year,
            license_plate: value.license_plate,
            color: value.color,
            mileage: value.mileage,
            status,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarListQuery {
    /// One of `AVAILABLE`, `RENTED`, `MAINTENANCE`, `UNAVAILABLE`.
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/cars",
    params(CarListQuery),
    responses(
        (status = 200, description = "Cars ordered by brand and model", body = [Car]),
        (status = 400, description = "Invalid car status", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cars"],
    operation_id = "listCars"
)]
#[get("/cars")]
pub async fn list_cars(
    state: web::Data<HttpState>,
    query: web::Query<CarListQuery>,
) -> ApiResult<web::Json<Vec<Car>>> {
    let status = parse_optional_status(query.status.as_deref(), INVALID_STATUS_MESSAGE)?;
    let cars = state.cars_query.list_cars(CarFilter { status }).await?;
    Ok(web::Json(cars))
}

#[utoipa::path(
    post,
    path = "/cars",
    request_body = CarRequest,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 400, description = "Invalid car or duplicate licence plate", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cars"],
    operation_id = "createCar"
)]
#[post("/cars")]
pub async fn create_car(
    state: web::Data<HttpState>,
    payload: web::Json<CarRequest>,
) -> ApiResult<HttpResponse> {
    let input = CarInput::try_from(payload.into_inner())?;
    let car = state.cars.create_car(input).await?;
    Ok(HttpResponse::Created().json(car))
}

#[utoipa::path(
    get,
    path = "/cars/{id}",
    params(("id" = i32, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Car", body = Car),
        (status = 400, description = "Invalid car ID", body = ErrorBody),
        (status = 404, description = "Car not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cars"],
    operation_id = "getCar"
)]
#[get("/cars/{id}")]
pub async fn get_car(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Car>> {
    let id = parse_car_id(&path)?;
    Ok(web::Json(state.cars_query.get_car(id).await?))
}

#[utoipa::path(
    put,
    path = "/cars/{id}",
    params(("id" = i32, Path, description = "Car identifier")),
    request_body = CarRequest,
    responses(
        (status = 200, description = "Car updated", body = Car),
        (status = 400, description = "Invalid input or duplicate licence plate", body = ErrorBody),
        (status = 404, description = "Car not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cars"],
    operation_id = "updateCar"
)]
#[put("/cars/{id}")]
pub async fn update_car(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CarRequest>,
) -> ApiResult<web::Json<Car>> {
    let id = parse_car_id(&path)?;
    let input = CarInput::try_from(payload.into_inner())?;
    Ok(web::Json(state.cars.update_car(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/cars/{id}",
    params(("id" = i32, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Car deleted", body = DeleteResponse),
        (status = 400, description = "Invalid ID or car still referenced by rentals", body = ErrorBody),
        (status = 404, description = "Car not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cars"],
    operation_id = "deleteCar"
)]
#[delete("/cars/{id}")]
pub async fn delete_car(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = parse_car_id(&path)?;
    state.cars.delete_car(id).await?;
    Ok(web::Json(DeleteResponse::ok()))
}

#[cfg(test)]
#[path = "cars_tests.rs"]
mod tests;
