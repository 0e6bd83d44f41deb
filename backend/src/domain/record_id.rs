//! Positive integer identifiers for store-generated records.
//!
//! Customers, cars, and rentals are keyed by `SERIAL` columns. Each entity
//! gets its own newtype so identifiers cannot be mixed up across tables.

/// Validation errors raised when parsing a record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdError {
    /// The raw value was not an integer.
    #[error("identifier must be an integer")]
    NotNumeric,
    /// The value was zero or negative.
    #[error("identifier must be positive")]
    NotPositive,
}

macro_rules! define_record_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i32) -> Result<Self, $crate::domain::RecordIdError> {
                if value <= 0 {
                    return Err($crate::domain::RecordIdError::NotPositive);
                }
                Ok(Self(value))
            }

            /// Parse an identifier from a path segment or other text input.
            pub fn parse(raw: &str) -> Result<Self, $crate::domain::RecordIdError> {
                let value = raw
                    .parse::<i32>()
                    .map_err(|_| $crate::domain::RecordIdError::NotNumeric)?;
                Self::new(value)
            }

            /// Access the raw integer value.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::domain::RecordIdError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_record_id;
