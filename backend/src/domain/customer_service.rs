//! Customer lifecycle service.
//!
//! Owns the customer rules: required fields, unique email, and no deletion
//! while a rental is still active. Uniqueness and the rental guard are
//! enforced atomically by the repository; this service validates input and
//! translates repository outcomes into domain errors.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CustomerCommand, CustomerDeletion, CustomerQuery, CustomerRepository, CustomerRepositoryError,
};
use crate::domain::{
    Customer, CustomerDetails, CustomerDraft, CustomerFilter, CustomerId, CustomerInput, Error,
};

pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "A customer with this email already exists";
pub(crate) const ACTIVE_RENTALS_MESSAGE: &str = "Cannot delete customer with active rentals";
const REQUIRED_FIELDS_MESSAGE: &str = "First name, last name, and email are required";
const NOT_FOUND_MESSAGE: &str = "Customer not found";

fn map_repository_error(error: CustomerRepositoryError) -> Error {
    match error {
        CustomerRepositoryError::DuplicateEmail => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
        CustomerRepositoryError::Connection { message } => {
            Error::internal(format!("customer repository unavailable: {message}"))
        }
        CustomerRepositoryError::Query { message } => {
            Error::internal(format!("customer repository error: {message}"))
        }
    }
}

fn validate(input: CustomerInput) -> Result<CustomerDraft, Error> {
    CustomerDraft::try_from(input).map_err(|_| Error::invalid_request(REQUIRED_FIELDS_MESSAGE))
}

/// Customer service implementing the customer driving ports.
#[derive(Clone)]
pub struct CustomerService<R> {
    customer_repo: Arc<R>,
}

impl<R> CustomerService<R> {
    /// Create a new service backed by the customer repository.
    pub fn new(customer_repo: Arc<R>) -> Self {
        Self { customer_repo }
    }
}

#[async_trait]
impl<R> CustomerCommand for CustomerService<R>
where
    R: CustomerRepository,
{
    async fn create_customer(&self, input: CustomerInput) -> Result<Customer, Error> {
        let draft = validate(input)?;
        self.customer_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        input: CustomerInput,
    ) -> Result<Customer, Error> {
        let draft = validate(input)?;
        self.customer_repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), Error> {
        let outcome = self
            .customer_repo
            .delete_unless_rented(id)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            CustomerDeletion::Deleted => Ok(()),
            CustomerDeletion::NotFound => Err(Error::not_found(NOT_FOUND_MESSAGE)),
            CustomerDeletion::HasActiveRentals => Err(Error::conflict(ACTIVE_RENTALS_MESSAGE)),
        }
    }
}

#[async_trait]
impl<R> CustomerQuery for CustomerService<R>
where
    R: CustomerRepository,
{
    async fn list_customers(&self, filter: CustomerFilter) -> Result<Vec<Customer>, Error> {
        self.customer_repo
            .list(&filter)
            .await
            .map_err(map_repository_error)
    }

    async fn get_customer(&self, id: CustomerId) -> Result<CustomerDetails, Error> {
        self.customer_repo
            .find_details(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "customer_service_tests.rs"]
mod tests;
