//! Port abstraction for customer persistence adapters and their errors.
//!
//! Adapters own the atomicity of each write: uniqueness is enforced by the
//! store and surfaced as [`CustomerRepositoryError::DuplicateEmail`], and the
//! active-rental guard is evaluated in the same transaction as the delete.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerDetails, CustomerDraft, CustomerFilter, CustomerId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "customer repository query failed: {message}",
        /// Another customer already holds the email address.
        DuplicateEmail => "customer email already exists",
    }
}

/// Result of a guarded customer deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerDeletion {
    /// The customer and their rental history were removed.
    Deleted,
    /// No customer has the requested id.
    NotFound,
    /// At least one rental referencing the customer is still active.
    HasActiveRentals,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// List customers matching the filter, ordered by last name ascending.
    async fn list(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// Fetch a customer with their rentals, newest start date first.
    async fn find_details(
        &self,
        id: CustomerId,
    ) -> Result<Option<CustomerDetails>, CustomerRepositoryError>;

    /// Insert a new customer and return the stored record.
    async fn insert(&self, draft: &CustomerDraft) -> Result<Customer, CustomerRepositoryError>;

    /// Overwrite every field of an existing customer.
    ///
    /// Returns `Ok(None)` when no customer has the given id.
    async fn update(
        &self,
        id: CustomerId,
        draft: &CustomerDraft,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Delete a customer unless an active rental references them.
    async fn delete_unless_rented(
        &self,
        id: CustomerId,
    ) -> Result<CustomerDeletion, CustomerRepositoryError>;
}
