//! Customer API handlers.
//!
//! ```text
//! GET    /customers?q=love
//! POST   /customers {"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com"}
//! GET    /customers/{id}
//! PUT    /customers/{id}
//! DELETE /customers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Customer, CustomerDetails, CustomerFilter, CustomerInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_customer_id;

/// Request body for creating or replacing a customer.
///
/// Fields are optional at the transport level so that missing values are
/// reported with the domain's validation message.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(value: CustomerRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
        }
    }
}

/// Query string for listing customers.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerListQuery {
    /// Case-insensitive search over first name, last name, and email.
    pub q: Option<String>,
}

/// Body returned by delete endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub(crate) fn ok() -> Self {
        Self { success: true }
    }
}

#[utoipa::path(
    get,
    path = "/customers",
    params(CustomerListQuery),
    responses(
        (status = 200, description = "Customers ordered by last name", body = [Customer]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["customers"],
    operation_id = "listCustomers"
)]
#[get("/customers")]
pub async fn list_customers(
    state: web::Data<HttpState>,
    query: web::Query<CustomerListQuery>,
) -> ApiResult<web::Json<Vec<Customer>>> {
    let filter = CustomerFilter::new(query.into_inner().q);
    let customers = state.customers_query.list_customers(filter).await?;
    Ok(web::Json(customers))
}

#[utoipa::path(
    post,
    path = "/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Missing fields or duplicate email", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("/customers")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    payload: web::Json<CustomerRequest>,
) -> ApiResult<HttpResponse> {
    let customer = state
        .customers
        .create_customer(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(customer))
}

/// Fetch a customer with rental history, newest first.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer with rentals", body = CustomerDetails),
        (status = 400, description = "Invalid customer ID", body = ErrorBody),
        (status = 404, description = "Customer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["customers"],
    operation_id = "getCustomer"
)]
#[get("/customers/{id}")]
pub async fn get_customer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CustomerDetails>> {
    let id = parse_customer_id(&path)?;
    let details = state.customers_query.get_customer(id).await?;
    Ok(web::Json(details))
}

/// Replace a customer. Omitted optional fields are cleared.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer identifier")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Invalid input or duplicate email", body = ErrorBody),
        (status = 404, description = "Customer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["customers"],
    operation_id = "updateCustomer"
)]
#[put("/customers/{id}")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CustomerRequest>,
) -> ApiResult<web::Json<Customer>> {
    let id = parse_customer_id(&path)?;
    let customer = state
        .customers
        .update_customer(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(customer))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer deleted", body = DeleteResponse),
        (status = 400, description = "Invalid ID or customer has active rentals", body = ErrorBody),
        (status = 404, description = "Customer not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["customers"],
    operation_id = "deleteCustomer"
)]
#[delete("/customers/{id}")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = parse_customer_id(&path)?;
    state.customers.delete_customer(id).await?;
    Ok(web::Json(DeleteResponse::ok()))
}

#[cfg(test)]
#[path = "customers_tests.rs"]
mod tests;
