//! Driving port for customer reads.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerDetails, CustomerFilter, CustomerId, Error};

#[async_trait]
pub trait CustomerQuery: Send + Sync {
    /// List customers ordered by last name, optionally filtered by a search term.
    async fn list_customers(&self, filter: CustomerFilter) -> Result<Vec<Customer>, Error>;

    /// Fetch one customer with their rental history.
    async fn get_customer(&self, id: CustomerId) -> Result<CustomerDetails, Error>;
}
