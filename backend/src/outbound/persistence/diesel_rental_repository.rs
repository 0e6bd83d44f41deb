//! PostgreSQL-backed `RentalRepository` implementation using Diesel ORM.
//!
//! Every state transition runs in one transaction that locks the rows it
//! guards: the car when starting a rental, the rental when closing one. The
//! partial unique index `rentals_active_car_key` backs the one-active-rental-
//! per-car rule.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{
    RentalClosure, RentalRepository, RentalRepositoryError, RentalStart,
};
use crate::domain::{
    Car, CarStatus, Customer, NewRental, Rental, RentalDetails, RentalFilter, RentalId,
    RentalReturn, RentalStatus,
};

use super::diesel_error_mapping::{
    RENTAL_ACTIVE_CAR_KEY, StoreFailure, classify_diesel_error, pool_error_message,
};
use super::models::{CarRow, CorruptRow, CustomerRow, NewRentalRow, RentalRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cars, customers, rentals};

/// Diesel-backed implementation of the rental repository port.
#[derive(Clone)]
pub struct DieselRentalRepository {
    pool: DbPool,
}

impl DieselRentalRepository {
    /// Create a rental repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RentalRepositoryError {
    RentalRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: DieselError) -> RentalRepositoryError {
    map_failure(classify_diesel_error(error))
}

fn map_failure(failure: StoreFailure) -> RentalRepositoryError {
    match failure {
        StoreFailure::Connection { message } => RentalRepositoryError::connection(message),
        StoreFailure::Query { message } => RentalRepositoryError::query(message),
        StoreFailure::UniqueViolation { constraint }
        | StoreFailure::ForeignKeyViolation { constraint } => RentalRepositoryError::query(
            format!("constraint violation: {}", constraint.unwrap_or_default()),
        ),
    }
}

fn map_corrupt_row(error: CorruptRow) -> RentalRepositoryError {
    RentalRepositoryError::query(error.to_string())
}

/// A concurrent start that won the race on the same car trips the
/// active-rental index; report that as the car being unavailable.
fn resolve_start(
    outcome: Result<RentalStart, StoreFailure>,
) -> Result<RentalStart, RentalRepositoryError> {
    match outcome {
        Ok(start) => Ok(start),
        Err(failure) if failure.violates_unique(RENTAL_ACTIVE_CAR_KEY) => {
            Ok(RentalStart::CarUnavailable(CarStatus::Rented))
        }
        Err(failure) => Err(map_failure(failure)),
    }
}

/// Surface a corrupt row from inside a transaction so it rolls back.
fn corrupt(error: CorruptRow) -> DieselError {
    DieselError::DeserializationError(Box::new(error))
}

type DetailsRow = (RentalRow, CustomerRow, CarRow);

fn to_details((rental, customer, car): DetailsRow) -> Result<RentalDetails, CorruptRow> {
    Ok(RentalDetails {
        rental: Rental::try_from(rental)?,
        customer: Customer::try_from(customer)?,
        car: Car::try_from(car)?,
    })
}

/// How an active rental is being closed.
#[derive(Debug, Clone, Copy)]
enum Closing {
    Complete(RentalReturn),
    Cancel,
}

async fn close_rental(
    conn: &mut AsyncPgConnection,
    id: i32,
    closing: Closing,
) -> Result<RentalClosure, DieselError> {
    let row: Option<RentalRow> = rentals::table
        .find(id)
        .select(RentalRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()?;
    let Some(row) = row else {
        return Ok(RentalClosure::NotFound);
    };

    let status = row.parsed_status().map_err(corrupt)?;
    if status != RentalStatus::Active {
        return Ok(RentalClosure::NotActive(status));
    }

    let (new_status, end_date, end_mileage): (RentalStatus, Option<DateTime<Utc>>, Option<i32>) =
        match closing {
            Closing::Complete(rental_return) => {
                if rental_return.end_mileage < row.start_mileage {
                    return Ok(RentalClosure::MileageBelowStart {
                        start_mileage: row.start_mileage,
                    });
                }
                (
                    RentalStatus::Completed,
                    Some(rental_return.end_date),
                    Some(rental_return.end_mileage),
                )
            }
            Closing::Cancel => (RentalStatus::Cancelled, None, None),
        };

    let updated: RentalRow = diesel::update(rentals::table.find(id))
        .set((
            rentals::status.eq(new_status.as_str()),
            rentals::end_date.eq(end_date),
            rentals::end_mileage.eq(end_mileage),
        ))
        .returning(RentalRow::as_returning())
        .get_result(conn)
        .await?;

    let car = cars::table.find(row.car_id);
    match end_mileage {
        Some(mileage) => {
            diesel::update(car)
                .set((
                    cars::status.eq(CarStatus::Available.as_str()),
                    cars::mileage.eq(mileage),
                ))
                .execute(conn)
                .await?;
        }
        None => {
            diesel::update(car)
                .set(cars::status.eq(CarStatus::Available.as_str()))
                .execute(conn)
                .await?;
        }
    }

    Rental::try_from(updated)
        .map(RentalClosure::Closed)
        .map_err(corrupt)
}

#[async_trait]
impl RentalRepository for DieselRentalRepository {
    async fn list(
        &self,
        filter: &RentalFilter,
    ) -> Result<Vec<RentalDetails>, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = rentals::table
            .inner_join(customers::table)
            .inner_join(cars::table)
            .select((
                RentalRow::as_select(),
                CustomerRow::as_select(),
                CarRow::as_select(),
            ))
            .order((rentals::start_date.desc(), rentals::id.desc()))
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(rentals::status.eq(status.as_str()));
        }

        let rows: Vec<DetailsRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(to_details)
            .collect::<Result<_, _>>()
            .map_err(map_corrupt_row)
    }

    async fn find_by_id(
        &self,
        id: RentalId,
    ) -> Result<Option<RentalDetails>, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DetailsRow> = rentals::table
            .inner_join(customers::table)
            .inner_join(cars::table)
            .filter(rentals::id.eq(id.get()))
            .select((
                RentalRow::as_select(),
                CustomerRow::as_select(),
                CarRow::as_select(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_details).transpose().map_err(map_corrupt_row)
    }

    async fn start(&self, rental: &NewRental) -> Result<RentalStart, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let request = *rental;

        let outcome = conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                let customer: Option<i32> = customers::table
                    .find(request.customer_id.get())
                    .select(customers::id)
                    .for_key_share()
                    .first(conn)
                    .await
                    .optional()?;
                if customer.is_none() {
                    return Ok(RentalStart::CustomerNotFound);
                }

                let car: Option<(i32, String)> = cars::table
                    .find(request.car_id.get())
                    .select((cars::mileage, cars::status))
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some((mileage, raw_status)) = car else {
                    return Ok(RentalStart::CarNotFound);
                };
                let status = raw_status
                    .parse::<CarStatus>()
                    .map_err(|err| DieselError::DeserializationError(Box::new(err)))?;
                if status != CarStatus::Available {
                    return Ok(RentalStart::CarUnavailable(status));
                }

                let row: RentalRow = diesel::insert_into(rentals::table)
                    .values(&NewRentalRow {
                        customer_id: request.customer_id.get(),
                        car_id: request.car_id.get(),
                        start_date: request.start_date,
                        start_mileage: mileage,
                        status: RentalStatus::Active.as_str(),
                    })
                    .returning(RentalRow::as_returning())
                    .get_result(conn)
                    .await?;

                diesel::update(cars::table.find(request.car_id.get()))
                    .set(cars::status.eq(CarStatus::Rented.as_str()))
                    .execute(conn)
                    .await?;

                Rental::try_from(row)
                    .map(RentalStart::Started)
                    .map_err(corrupt)
            }
            .scope_boxed()
        })
        .await;

        resolve_start(outcome.map_err(classify_diesel_error))
    }

    async fn complete(
        &self,
        id: RentalId,
        rental_return: &RentalReturn,
    ) -> Result<RentalClosure, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let closing = Closing::Complete(*rental_return);

        conn.transaction::<_, DieselError, _>(|conn| {
            close_rental(conn, id.get(), closing).scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn cancel(&self, id: RentalId) -> Result<RentalClosure, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, DieselError, _>(|conn| {
            close_rental(conn, id.get(), Closing::Cancel).scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
