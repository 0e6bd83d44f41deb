//! PostgreSQL-backed `CarRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CarDeletion, CarRepository, CarRepositoryError};
use crate::domain::{Car, CarDraft, CarFilter, CarId, CarStatus, RentalStatus};

use super::diesel_error_mapping::{
    CAR_LICENSE_PLATE_KEY, StoreFailure, classify_diesel_error, pool_error_message,
};
use super::models::{CarRow, CarWriteRow, CorruptRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cars, rentals};

/// Diesel-backed implementation of the car repository port.
#[derive(Clone)]
pub struct DieselCarRepository {
    pool: DbPool,
}

impl DieselCarRepository {
    /// Create a car repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CarRepositoryError {
    CarRepositoryError::connection(pool_error_message(error))
}

fn map_failure(failure: StoreFailure) -> CarRepositoryError {
    if failure.violates_unique(CAR_LICENSE_PLATE_KEY) {
        return CarRepositoryError::duplicate_license_plate();
    }
    match failure {
        StoreFailure::Connection { message } => CarRepositoryError::connection(message),
        StoreFailure::Query { message } => CarRepositoryError::query(message),
        StoreFailure::UniqueViolation { constraint }
        | StoreFailure::ForeignKeyViolation { constraint } => CarRepositoryError::query(format!(
            "constraint violation: {}",
            constraint.unwrap_or_default()
        )),
    }
}

fn map_diesel_error(error: DieselError) -> CarRepositoryError {
    map_failure(classify_diesel_error(error))
}

fn map_corrupt_row(error: CorruptRow) -> CarRepositoryError {
    CarRepositoryError::query(error.to_string())
}

async fn has_active_rental(conn: &mut AsyncPgConnection, car_id: i32) -> QueryResult<bool> {
    diesel::select(exists(
        rentals::table
            .filter(rentals::car_id.eq(car_id))
            .filter(rentals::status.eq(RentalStatus::Active.as_str())),
    ))
    .get_result(conn)
    .await
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = cars::table
            .select(CarRow::as_select())
            .order((cars::brand.asc(), cars::model.asc(), cars::id.asc()))
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(cars::status.eq(status.as_str()));
        }

        let rows: Vec<CarRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(Car::try_from)
            .collect::<Result<_, _>>()
            .map_err(map_corrupt_row)
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CarRow> = cars::table
            .find(id.get())
            .select(CarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Car::try_from).transpose().map_err(map_corrupt_row)
    }

    async fn insert(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CarRow = diesel::insert_into(cars::table)
            .values(&CarWriteRow::from(draft))
            .returning(CarRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Car::try_from(row).map_err(map_corrupt_row)
    }

    async fn update(&self, id: CarId, draft: &CarDraft) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();
        let draft = draft.clone();

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                let locked: Option<(i32, String)> = cars::table
                    .find(raw_id)
                    .select((cars::mileage, cars::status))
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some((stored_mileage, stored_status)) = locked else {
                    return Ok(None);
                };

                let mut changes = CarWriteRow::from(&draft);
                // Status and odometer belong to the rental lifecycle while a rental is open.
                if has_active_rental(conn, raw_id).await? {
                    let status = stored_status
                        .parse::<CarStatus>()
                        .map_err(|err| DieselError::DeserializationError(Box::new(err)))?;
                    changes.status = status.as_str();
                    changes.mileage = stored_mileage;
                }

                let row: CarRow = diesel::update(cars::table.find(raw_id))
                    .set(&changes)
                    .returning(CarRow::as_returning())
                    .get_result(conn)
                    .await?;
                Ok(Some(row))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?
        .map(Car::try_from)
        .transpose()
        .map_err(map_corrupt_row)
    }

    async fn delete_unless_rented(&self, id: CarId) -> Result<CarDeletion, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();

        let outcome = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let locked: Option<i32> = cars::table
                        .find(raw_id)
                        .select(cars::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(CarDeletion::NotFound);
                    }

                    if has_active_rental(conn, raw_id).await? {
                        return Ok(CarDeletion::HasActiveRentals);
                    }

                    diesel::delete(cars::table.find(raw_id))
                        .execute(conn)
                        .await?;
                    Ok(CarDeletion::Deleted)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(deletion) => Ok(deletion),
            Err(error) => match classify_diesel_error(error) {
                // ON DELETE RESTRICT from rentals.car_id
                StoreFailure::ForeignKeyViolation { .. } => Ok(CarDeletion::HasRentalHistory),
                failure => Err(map_failure(failure)),
            },
        }
    }
}
