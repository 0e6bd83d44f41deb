//! Driving port for customer mutations.
//!
//! Inbound adapters hand raw [`CustomerInput`] to this port; validation,
//! uniqueness, and the active-rental guard live behind it.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerId, CustomerInput, Error};

#[async_trait]
pub trait CustomerCommand: Send + Sync {
    /// Validate and register a new customer.
    async fn create_customer(&self, input: CustomerInput) -> Result<Customer, Error>;

    /// Validate and overwrite an existing customer.
    async fn update_customer(&self, id: CustomerId, input: CustomerInput)
    -> Result<Customer, Error>;

    /// Remove a customer who has no active rental.
    async fn delete_customer(&self, id: CustomerId) -> Result<(), Error>;
}
