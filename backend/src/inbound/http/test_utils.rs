//! Test helpers for inbound HTTP components.
//!
//! [`InMemoryRentalStore`] implements all three repository ports over a
//! single mutex-guarded state so handler tests exercise the real services
//! without a database. It mirrors the store rules: case-insensitive unique
//! emails, unique plates, at most one active rental per car, cascade from
//! customers, restrict from cars.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::Utc;

use crate::Trace;
use crate::domain::ports::{
    CarDeletion, CarRepository, CarRepositoryError, CustomerDeletion, CustomerRepository,
    CustomerRepositoryError, RentalClosure, RentalRepository, RentalRepositoryError, RentalStart,
};
use crate::domain::{
    Car, CarDraft, CarFilter, CarId, CarService, CarStatus, Customer, CustomerDetails,
    CustomerDraft, CustomerFilter, CustomerId, CustomerService, NewRental, Rental, RentalDetails,
    RentalFilter, RentalId, RentalReturn, RentalService, RentalStatus, RentalWithCar,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

#[derive(Default)]
struct StoreState {
    customers: BTreeMap<i32, Customer>,
    cars: BTreeMap<i32, Car>,
    rentals: BTreeMap<i32, Rental>,
    next_id: i32,
}

impl StoreState {
    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str, except: Option<CustomerId>) -> bool {
        let wanted = email.to_lowercase();
        self.customers
            .values()
            .any(|customer| Some(customer.id) != except && customer.email.to_lowercase() == wanted)
    }

    fn plate_taken(&self, plate: &str, except: Option<CarId>) -> bool {
        self.cars
            .values()
            .any(|car| Some(car.id) != except && car.license_plate == plate)
    }

    fn has_active_rental(&self, car: CarId) -> bool {
        self.rentals
            .values()
            .any(|rental| rental.car_id == car && rental.status == RentalStatus::Active)
    }

    fn car(&self, id: CarId) -> Option<&Car> {
        self.cars.get(&id.get())
    }

    fn details(&self, rental: &Rental) -> Option<RentalDetails> {
        Some(RentalDetails {
            rental: rental.clone(),
            customer: self.customers.get(&rental.customer_id.get())?.clone(),
            car: self.car(rental.car_id)?.clone(),
        })
    }

    fn newest_first<'a>(rentals: impl Iterator<Item = &'a Rental>) -> Vec<&'a Rental> {
        let mut sorted: Vec<&Rental> = rentals.collect();
        sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        sorted
    }

    fn close(&mut self, id: RentalId, completion: Option<RentalReturn>) -> RentalClosure {
        let Some(rental) = self.rentals.get_mut(&id.get()) else {
            return RentalClosure::NotFound;
        };
        if rental.status != RentalStatus::Active {
            return RentalClosure::NotActive(rental.status);
        }
        if let Some(rental_return) = completion {
            if rental_return.end_mileage < rental.start_mileage {
                return RentalClosure::MileageBelowStart {
                    start_mileage: rental.start_mileage,
                };
            }
            rental.status = RentalStatus::Completed;
            rental.end_date = Some(rental_return.end_date);
            rental.end_mileage = Some(rental_return.end_mileage);
        } else {
            rental.status = RentalStatus::Cancelled;
        }
        rental.updated_at = Utc::now();
        let closed = rental.clone();

        if let Some(car) = self.cars.get_mut(&closed.car_id.get()) {
            car.status = CarStatus::Available;
            if let Some(mileage) = closed.end_mileage {
                car.mileage = mileage;
            }
            car.updated_at = Utc::now();
        }
        RentalClosure::Closed(closed)
    }
}

/// In-memory implementation of the customer, car, and rental repositories.
#[derive(Default)]
pub struct InMemoryRentalStore {
    state: Mutex<StoreState>,
}

impl InMemoryRentalStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryRentalStore {
    async fn list(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let state = self.lock();
        let mut customers: Vec<Customer> = state
            .customers
            .values()
            .filter(|customer| filter.matches(customer))
            .cloned()
            .collect();
        customers.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)));
        Ok(customers)
    }

    async fn find_details(
        &self,
        id: CustomerId,
    ) -> Result<Option<CustomerDetails>, CustomerRepositoryError> {
        let state = self.lock();
        let Some(customer) = state.customers.get(&id.get()).cloned() else {
            return Ok(None);
        };
        let rentals = StoreState::newest_first(
            state
                .rentals
                .values()
                .filter(|rental| rental.customer_id == id),
        )
        .into_iter()
        .filter_map(|rental| {
            Some(RentalWithCar {
                rental: rental.clone(),
                car: state.car(rental.car_id)?.clone(),
            })
        })
        .collect();
        Ok(Some(CustomerDetails { customer, rentals }))
    }

    async fn insert(&self, draft: &CustomerDraft) -> Result<Customer, CustomerRepositoryError> {
        let mut state = self.lock();
        if state.email_taken(draft.email(), None) {
            return Err(CustomerRepositoryError::duplicate_email());
        }
        let now = Utc::now();
        let id = state.allocate();
        let customer = Customer {
            id: CustomerId::new(id).map_err(|err| CustomerRepositoryError::query(err.to_string()))?,
            first_name: draft.first_name().to_owned(),
            last_name: draft.last_name().to_owned(),
            email: draft.email().to_owned(),
            phone: draft.phone().map(str::to_owned),
            address: draft.address().map(str::to_owned),
            created_at: now,
            updated_at: now,
        };
        state.customers.insert(id, customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        id: CustomerId,
        draft: &CustomerDraft,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut state = self.lock();
        if !state.customers.contains_key(&id.get()) {
            return Ok(None);
        }
        if state.email_taken(draft.email(), Some(id)) {
            return Err(CustomerRepositoryError::duplicate_email());
        }
        let Some(customer) = state.customers.get_mut(&id.get()) else {
            return Ok(None);
        };
        customer.first_name = draft.first_name().to_owned();
        customer.last_name = draft.last_name().to_owned();
        customer.email = draft.email().to_owned();
        customer.phone = draft.phone().map(str::to_owned);
        customer.address = draft.address().map(str::to_owned);
        customer.updated_at = Utc::now();
        Ok(Some(customer.clone()))
    }

    async fn delete_unless_rented(
        &self,
        id: CustomerId,
    ) -> Result<CustomerDeletion, CustomerRepositoryError> {
        let mut state = self.lock();
        if !state.customers.contains_key(&id.get()) {
            return Ok(CustomerDeletion::NotFound);
        }
        let has_active = state
            .rentals
            .values()
            .any(|rental| rental.customer_id == id && rental.status == RentalStatus::Active);
        if has_active {
            return Ok(CustomerDeletion::HasActiveRentals);
        }
        state.customers.remove(&id.get());
        state.rentals.retain(|_, rental| rental.customer_id != id);
        Ok(CustomerDeletion::Deleted)
    }
}

fn car_from_draft(id: CarId, draft: &CarDraft, created_at: chrono::DateTime<Utc>) -> Car {
    Car {
        id,
        brand: draft.brand().to_owned(),
        model: draft.model().to_owned(),
        year: draft.year(),
        license_plate: draft.license_plate().to_owned(),
        color: draft.color().map(str::to_owned),
        mileage: draft.mileage(),
        status: draft.status(),
        created_at,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl CarRepository for InMemoryRentalStore {
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, CarRepositoryError> {
        let state = self.lock();
        let mut cars: Vec<Car> = state
            .cars
            .values()
            .filter(|car| filter.matches(car))
            .cloned()
            .collect();
        cars.sort_by(|a, b| {
            a.brand
                .cmp(&b.brand)
                .then_with(|| a.model.cmp(&b.model))
                .then(a.id.cmp(&b.id))
        });
        Ok(cars)
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        Ok(self.lock().car(id).cloned())
    }

    async fn insert(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError> {
        let mut state = self.lock();
        if state.plate_taken(draft.license_plate(), None) {
            return Err(CarRepositoryError::duplicate_license_plate());
        }
        let raw = state.allocate();
        let id = CarId::new(raw).map_err(|err| CarRepositoryError::query(err.to_string()))?;
        let car = car_from_draft(id, draft, Utc::now());
        state.cars.insert(raw, car.clone());
        Ok(car)
    }

    async fn update(&self, id: CarId, draft: &CarDraft) -> Result<Option<Car>, CarRepositoryError> {
        let mut state = self.lock();
        let Some(stored) = state.car(id).cloned() else {
            return Ok(None);
        };
        if state.plate_taken(draft.license_plate(), Some(id)) {
            return Err(CarRepositoryError::duplicate_license_plate());
        }
        let mut car = car_from_draft(id, draft, stored.created_at);
        if state.has_active_rental(id) {
            car.status = stored.status;
            car.mileage = stored.mileage;
        }
        state.cars.insert(id.get(), car.clone());
        Ok(Some(car))
    }

    async fn delete_unless_rented(&self, id: CarId) -> Result<CarDeletion, CarRepositoryError> {
        let mut state = self.lock();
        if state.car(id).is_none() {
            return Ok(CarDeletion::NotFound);
        }
        if state.has_active_rental(id) {
            return Ok(CarDeletion::HasActiveRentals);
        }
        if state.rentals.values().any(|rental| rental.car_id == id) {
            return Ok(CarDeletion::HasRentalHistory);
        }
        state.cars.remove(&id.get());
        Ok(CarDeletion::Deleted)
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentalStore {
    async fn list(
        &self,
        filter: &RentalFilter,
    ) -> Result<Vec<RentalDetails>, RentalRepositoryError> {
        let state = self.lock();
        let rentals = StoreState::newest_first(
            state
                .rentals
                .values()
                .filter(|rental| filter.status.is_none_or(|status| rental.status == status)),
        );
        Ok(rentals
            .into_iter()
            .filter_map(|rental| state.details(rental))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: RentalId,
    ) -> Result<Option<RentalDetails>, RentalRepositoryError> {
        let state = self.lock();
        Ok(state
            .rentals
            .get(&id.get())
            .and_then(|rental| state.details(rental)))
    }

    async fn start(&self, request: &NewRental) -> Result<RentalStart, RentalRepositoryError> {
        let mut state = self.lock();
        if !state.customers.contains_key(&request.customer_id.get()) {
            return Ok(RentalStart::CustomerNotFound);
        }
        let Some(car) = state.car(request.car_id) else {
            return Ok(RentalStart::CarNotFound);
        };
        if car.status != CarStatus::Available {
            return Ok(RentalStart::CarUnavailable(car.status));
        }
        if state.has_active_rental(request.car_id) {
            return Ok(RentalStart::CarUnavailable(CarStatus::Rented));
        }
        let start_mileage = car.mileage;

        let raw = state.allocate();
        let now = Utc::now();
        let rental = Rental {
            id: RentalId::new(raw).map_err(|err| RentalRepositoryError::query(err.to_string()))?,
            customer_id: request.customer_id,
            car_id: request.car_id,
            start_date: request.start_date,
            end_date: None,
            start_mileage,
            end_mileage: None,
            status: RentalStatus::Active,
            created_at: now,
            updated_at: now,
        };
        state.rentals.insert(raw, rental.clone());
        if let Some(car) = state.cars.get_mut(&request.car_id.get()) {
            car.status = CarStatus::Rented;
        }
        Ok(RentalStart::Started(rental))
    }

    async fn complete(
        &self,
        id: RentalId,
        rental_return: &RentalReturn,
    ) -> Result<RentalClosure, RentalRepositoryError> {
        Ok(self.lock().close(id, Some(*rental_return)))
    }

    async fn cancel(&self, id: RentalId) -> Result<RentalClosure, RentalRepositoryError> {
        Ok(self.lock().close(id, None))
    }
}

/// Build HTTP state whose services all share one in-memory store.
pub fn in_memory_state(store: Arc<InMemoryRentalStore>) -> HttpState {
    let customers = Arc::new(CustomerService::new(store.clone()));
    let cars = Arc::new(CarService::new(store.clone()));
    let rentals = Arc::new(RentalService::new(store));
    HttpState::new(HttpStatePorts {
        customers: customers.clone(),
        customers_query: customers,
        cars: cars.clone(),
        cars_query: cars,
        rentals: rentals.clone(),
        rentals_query: rentals,
    })
}

/// Application wired like production, minus the database.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(state))
        .configure(configure_api)
}
