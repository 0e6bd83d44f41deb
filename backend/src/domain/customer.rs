//! Customer data model.
//!
//! A [`Customer`] is the persisted record returned by the store. Client input
//! arrives as [`CustomerInput`] and is validated into a [`CustomerDraft`]
//! before any repository call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::record_id::define_record_id;
use super::rental::RentalWithCar;

define_record_id! {
    /// Store-generated customer identifier.
    CustomerId
}

/// Validation errors returned when building a [`CustomerDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CustomerValidationError {
    /// First name missing or blank.
    #[error("first name must not be empty")]
    MissingFirstName,
    /// Last name missing or blank.
    #[error("last name must not be empty")]
    MissingLastName,
    /// Email missing or blank.
    #[error("email must not be empty")]
    MissingEmail,
}

/// Persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[schema(value_type = i32, example = 1)]
    pub id: CustomerId,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer together with rental history, newest start date first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(flatten)]
    pub customer: Customer,
    pub rentals: Vec<RentalWithCar>,
}

/// Raw customer fields as supplied by a client.
///
/// Every field is optional here so that missing values surface as domain
/// validation errors rather than transport decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Validated customer fields ready to be written.
///
/// ## Invariants
/// - `first_name`, `last_name`, and `email` are trimmed and non-empty.
/// - `phone` and `address` are trimmed; blank values become `None`.
///
/// # Examples
/// ```
/// use rental_backend::domain::{CustomerDraft, CustomerInput};
///
/// let draft = CustomerDraft::try_from(CustomerInput {
///     first_name: Some("Ada".into()),
///     last_name: Some("Lovelace".into()),
///     email: Some("ada@example.com".into()),
///     phone: Some("  ".into()),
///     address: None,
/// })
/// .expect("valid customer");
/// assert_eq!(draft.email(), "ada@example.com");
/// assert!(draft.phone().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
}

pub(crate) fn required(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl CustomerDraft {
    /// Validate raw parts into a draft.
    pub fn try_from_parts(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Result<Self, CustomerValidationError> {
        let first_name = required(first_name).ok_or(CustomerValidationError::MissingFirstName)?;
        let last_name = required(last_name).ok_or(CustomerValidationError::MissingLastName)?;
        let email = required(email).ok_or(CustomerValidationError::MissingEmail)?;

        Ok(Self {
            first_name,
            last_name,
            email,
            phone: required(phone),
            address: required(address),
        })
    }

    /// Trimmed first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Trimmed last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Trimmed email, stored as entered.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number, absent when blank.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Postal address, absent when blank.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

impl TryFrom<CustomerInput> for CustomerDraft {
    type Error = CustomerValidationError;

    fn try_from(value: CustomerInput) -> Result<Self, Self::Error> {
        let CustomerInput {
            first_name,
            last_name,
            email,
            phone,
            address,
        } = value;
        Self::try_from_parts(first_name, last_name, email, phone, address)
    }
}

/// Search filter for listing customers.
///
/// A blank query is treated the same as no query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    query: Option<String>,
}

impl CustomerFilter {
    /// Build a filter from an optional free-text query.
    pub fn new(query: Option<String>) -> Self {
        Self {
            query: required(query),
        }
    }

    /// Filter that matches every customer.
    pub fn all() -> Self {
        Self::default()
    }

    /// Trimmed search term, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Case-insensitive substring match over first name, last name, and email.
    pub fn matches(&self, customer: &Customer) -> bool {
        let Some(query) = self.query() else {
            return true;
        };
        let needle = query.to_lowercase();
        [
            customer.first_name.as_str(),
            customer.last_name.as_str(),
            customer.email.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
