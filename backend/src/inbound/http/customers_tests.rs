//! Tests for the customer API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{InMemoryRentalStore, in_memory_state, test_app};

#[fixture]
fn ada() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "phone": "+44 20 7946 0000"
    })
}

fn state() -> crate::inbound::http::state::HttpState {
    in_memory_state(Arc::new(InMemoryRentalStore::default()))
}

#[rstest]
#[actix_web::test]
async fn create_then_fetch_customer(ada: Value) {
    let app = actix_test::init_service(test_app(state())).await;

    let created = actix_test::TestRequest::post()
        .uri("/customers")
        .set_json(&ada)
        .send_request(&app)
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(created).await;
    assert_eq!(body["firstName"], "Ada");
    assert!(body["address"].is_null());
    let id = body["id"].as_i64().expect("numeric id");

    let fetched = actix_test::TestRequest::get()
        .uri(&format!("/customers/{id}"))
        .send_request(&app)
        .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["rentals"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected_case_insensitively(ada: Value) {
    let app = actix_test::init_service(test_app(state())).await;
    let first = actix_test::TestRequest::post()
        .uri("/customers")
        .set_json(&ada)
        .send_request(&app)
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let mut shouting = ada.clone();
    shouting["email"] = json!("ADA@EXAMPLE.COM");
    let second = actix_test::TestRequest::post()
        .uri("/customers")
        .set_json(&shouting)
        .send_request(&app)
        .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(
        body,
        json!({ "message": "A customer with this email already exists" })
    );
}

#[rstest]
#[case(json!({ "lastName": "Lovelace", "email": "ada@example.com" }))]
#[case(json!({ "firstName": "Ada", "lastName": "  ", "email": "ada@example.com" }))]
#[case(json!({}))]
#[actix_web::test]
async fn missing_required_fields_are_rejected(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(state())).await;
    let response = actix_test::TestRequest::post()
        .uri("/customers")
        .set_json(&payload)
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "First name, last name, and email are required");
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-1")]
#[actix_web::test]
async fn malformed_ids_are_rejected(#[case] raw: &str) {
    let app = actix_test::init_service(test_app(state())).await;
    let response = actix_test::TestRequest::get()
        .uri(&format!("/customers/{raw}"))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "message": "Invalid customer ID" }));
}

#[rstest]
#[actix_web::test]
async fn unknown_customer_is_not_found(ada: Value) {
    let app = actix_test::init_service(test_app(state())).await;
    let fetched = actix_test::TestRequest::get()
        .uri("/customers/999")
        .send_request(&app)
        .await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(body, json!({ "message": "Customer not found" }));

    let updated = actix_test::TestRequest::put()
        .uri("/customers/999")
        .set_json(&ada)
        .send_request(&app)
        .await;
    assert_eq!(updated.status(), StatusCode::NOT_FOUND);

    let deleted = actix_test::TestRequest::delete()
        .uri("/customers/999")
        .send_request(&app)
        .await;
    assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn search_matches_names_and_email_ordered_by_last_name() {
    let app = actix_test::init_service(test_app(state())).await;
    for (first, last, email) in [
        ("Grace", "Hopper", "grace@navy.example"),
        ("Ada", "Lovelace", "ada@example.com"),
        ("Charles", "Babbage", "charles@example.com"),
    ] {
        let response = actix_test::TestRequest::post()
            .uri("/customers")
            .set_json(json!({ "firstName": first, "lastName": last, "email": email }))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let all: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/customers").to_request(),
    )
    .await;
    let last_names: Vec<&str> = all
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|customer| customer["lastName"].as_str())
        .collect();
    assert_eq!(last_names, ["Babbage", "Hopper", "Lovelace"]);

    let matches: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/customers?q=EXAMPLE.COM")
            .to_request(),
    )
    .await;
    assert_eq!(matches.as_array().map(Vec::len), Some(2));

    let blank: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/customers?q=%20")
            .to_request(),
    )
    .await;
    assert_eq!(blank.as_array().map(Vec::len), Some(3));
}

#[rstest]
#[actix_web::test]
async fn update_keeps_own_email_and_clears_omitted_fields(ada: Value) {
    let app = actix_test::init_service(test_app(state())).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/customers")
            .set_json(&ada)
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().expect("numeric id");

    let response = actix_test::TestRequest::put()
        .uri(&format!("/customers/{id}"))
        .set_json(json!({
            "firstName": "Augusta Ada",
            "lastName": "King",
            "email": "ada@example.com"
        }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["lastName"], "King");
    assert!(body["phone"].is_null());
}

#[rstest]
#[actix_web::test]
async fn delete_is_blocked_while_a_rental_is_active(ada: Value) {
    let app = actix_test::init_service(test_app(state())).await;
    let customer: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/customers")
            .set_json(&ada)
            .to_request(),
    )
    .await;
    let car: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/cars")
            .set_json(json!({
                "brand": "Toyota",
                "model": "Corolla",
                "year": 2021,
                "licensePlate": "AB-123-CD",
                "mileage": 12000
            }))
            .to_request(),
    )
    .await;
    let rental: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/rentals")
            .set_json(json!({ "customerId": customer["id"], "carId": car["id"] }))
            .to_request(),
    )
    .await;
    let customer_uri = format!("/customers/{}", customer["id"]);

    let blocked = actix_test::TestRequest::delete()
        .uri(&customer_uri)
        .send_request(&app)
        .await;
    assert_eq!(blocked.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(blocked).await;
    assert_eq!(
        body,
        json!({ "message": "Cannot delete customer with active rentals" })
    );

    let completed = actix_test::TestRequest::post()
        .uri(&format!("/rentals/{}/complete", rental["id"]))
        .set_json(json!({ "endMileage": 12500 }))
        .send_request(&app)
        .await;
    assert_eq!(completed.status(), StatusCode::OK);

    let deleted = actix_test::TestRequest::delete()
        .uri(&customer_uri)
        .send_request(&app)
        .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(deleted).await;
    assert_eq!(body, json!({ "success": true }));

    let gone = actix_test::TestRequest::get()
        .uri(&customer_uri)
        .send_request(&app)
        .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_yields_message_body() {
    let app = actix_test::init_service(test_app(state())).await;
    let response = actix_test::TestRequest::post()
        .uri("/customers")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"firstName\":")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let message = body["message"].as_str().expect("message string");
    assert!(message.starts_with("Invalid JSON body"));
    assert_eq!(body.as_object().map(|fields| fields.len()), Some(1));
}
