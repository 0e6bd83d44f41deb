//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules beyond the atomicity each port requires.

pub mod persistence;
