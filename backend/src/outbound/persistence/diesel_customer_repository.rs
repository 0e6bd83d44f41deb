//! PostgreSQL-backed `CustomerRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is left to the `customers_email_lower_key` index, so two
//! concurrent creates with the same address cannot both succeed. Deletion
//! locks the customer row before checking for active rentals; inserting a
//! rental takes a key-share lock on the same row, which serialises the two.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{CustomerDeletion, CustomerRepository, CustomerRepositoryError};
use crate::domain::{
    Car, Customer, CustomerDetails, CustomerDraft, CustomerFilter, CustomerId, Rental,
    RentalStatus, RentalWithCar,
};

use super::diesel_error_mapping::{
    CUSTOMER_EMAIL_KEY, StoreFailure, classify_diesel_error, pool_error_message,
};
use super::models::{CarRow, CorruptRow, CustomerRow, CustomerWriteRow, RentalRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cars, customers, rentals};

/// Diesel-backed implementation of the customer repository port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerRepositoryError {
    CustomerRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CustomerRepositoryError {
    let failure = classify_diesel_error(error);
    if failure.violates_unique(CUSTOMER_EMAIL_KEY) {
        return CustomerRepositoryError::duplicate_email();
    }
    match failure {
        StoreFailure::Connection { message } => CustomerRepositoryError::connection(message),
        StoreFailure::Query { message } => CustomerRepositoryError::query(message),
        StoreFailure::UniqueViolation { constraint }
        | StoreFailure::ForeignKeyViolation { constraint } => CustomerRepositoryError::query(
            format!("constraint violation: {}", constraint.unwrap_or_default()),
        ),
    }
}

fn map_corrupt_row(error: CorruptRow) -> CustomerRepositoryError {
    CustomerRepositoryError::query(error.to_string())
}

/// Escape `LIKE` metacharacters so the term is matched literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_rental_with_car((rental, car): (RentalRow, CarRow)) -> Result<RentalWithCar, CorruptRow> {
    Ok(RentalWithCar {
        rental: Rental::try_from(rental)?,
        car: Car::try_from(car)?,
    })
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn list(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = customers::table
            .select(CustomerRow::as_select())
            .order((customers::last_name.asc(), customers::id.asc()))
            .into_boxed();

        if let Some(term) = filter.query() {
            let pattern = format!("%{}%", escape_like(term));
            query = query.filter(
                customers::first_name
                    .ilike(pattern.clone())
                    .or(customers::last_name.ilike(pattern.clone()))
                    .or(customers::email.ilike(pattern)),
            );
        }

        let rows: Vec<CustomerRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(Customer::try_from)
            .collect::<Result<_, _>>()
            .map_err(map_corrupt_row)
    }

    async fn find_details(
        &self,
        id: CustomerId,
    ) -> Result<Option<CustomerDetails>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CustomerRow> = customers::table
            .find(id.get())
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let history: Vec<(RentalRow, CarRow)> = rentals::table
            .inner_join(cars::table)
            .filter(rentals::customer_id.eq(id.get()))
            .order((rentals::start_date.desc(), rentals::id.desc()))
            .select((RentalRow::as_select(), CarRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let customer = Customer::try_from(row).map_err(map_corrupt_row)?;
        let rentals = history
            .into_iter()
            .map(to_rental_with_car)
            .collect::<Result<_, _>>()
            .map_err(map_corrupt_row)?;

        Ok(Some(CustomerDetails { customer, rentals }))
    }

    async fn insert(&self, draft: &CustomerDraft) -> Result<Customer, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CustomerRow = diesel::insert_into(customers::table)
            .values(&CustomerWriteRow::from(draft))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Customer::try_from(row).map_err(map_corrupt_row)
    }

    async fn update(
        &self,
        id: CustomerId,
        draft: &CustomerDraft,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CustomerRow> = diesel::update(customers::table.find(id.get()))
            .set(&CustomerWriteRow::from(draft))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Customer::try_from)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn delete_unless_rented(
        &self,
        id: CustomerId,
    ) -> Result<CustomerDeletion, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let locked: Option<i32> = customers::table
                    .find(raw_id)
                    .select(customers::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if locked.is_none() {
                    return Ok(CustomerDeletion::NotFound);
                }

                let has_active: bool = diesel::select(exists(
                    rentals::table
                        .filter(rentals::customer_id.eq(raw_id))
                        .filter(rentals::status.eq(RentalStatus::Active.as_str())),
                ))
                .get_result(conn)
                .await?;
                if has_active {
                    return Ok(CustomerDeletion::HasActiveRentals);
                }

                diesel::delete(customers::table.find(raw_id))
                    .execute(conn)
                    .await?;
                Ok(CustomerDeletion::Deleted)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
