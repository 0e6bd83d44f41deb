//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered rental customers.
    ///
    /// Email uniqueness is enforced case-insensitively by the
    /// `customers_email_lower_key` expression index.
    customers (id) {
        id -> Int4,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        phone -> Nullable<Varchar>,
        address -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Fleet vehicles.
    cars (id) {
        id -> Int4,
        brand -> Varchar,
        model -> Varchar,
        year -> Int4,
        /// Unique via `cars_license_plate_key`.
        license_plate -> Varchar,
        color -> Nullable<Varchar>,
        mileage -> Int4,
        /// One of `AVAILABLE`, `RENTED`, `MAINTENANCE`, `UNAVAILABLE`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rental transactions linking a customer to a car.
    ///
    /// Deleting a customer cascades to their rentals; deleting a car with
    /// rentals is restricted.
    rentals (id) {
        id -> Int4,
        customer_id -> Int4,
        car_id -> Int4,
        start_date -> Timestamptz,
        end_date -> Nullable<Timestamptz>,
        start_mileage -> Int4,
        end_mileage -> Nullable<Int4>,
        /// One of `ACTIVE`, `COMPLETED`, `CANCELLED`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(rentals -> customers (customer_id));
diesel::joinable!(rentals -> cars (car_id));

diesel::allow_tables_to_appear_in_same_query!(customers, cars, rentals);
