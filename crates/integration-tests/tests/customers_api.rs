//! End-to-end tests for the customer API.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crm_integration_tests::{body_json, body_string, empty_request, json_request, send, test_app};

const API_CUSTOMER_PATH: &str = "/api/v1/customers";

/// A random email so tests never collide on the uniqueness constraint.
fn random_email() -> String {
    format!("{}@gmail.com", Uuid::new_v4())
}

/// Create a customer via the API and return its id from the list endpoint.
async fn create_customer(app: &Router, name: &str, email: &str, address: &str) -> i64 {
    let response = send(
        app,
        json_request(
            "POST",
            API_CUSTOMER_PATH,
            &json!({ "name": name, "email": email, "address": address }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let customers = body_json(send(app, empty_request("GET", API_CUSTOMER_PATH)).await).await;
    customers
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["email"] == email)
        .and_then(|c| c["id"].as_i64())
        .unwrap()
}

#[tokio::test]
async fn test_create_customer_appears_in_list() {
    let app = test_app();
    let email = random_email();

    let response = send(
        &app,
        json_request(
            "POST",
            API_CUSTOMER_PATH,
            &json!({ "name": "name", "email": email, "address": "US" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");

    let response = send(&app, empty_request("GET", API_CUSTOMER_PATH)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let customers = body_json(response).await;
    let created = customers
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["email"] == email)
        .unwrap();

    assert_eq!(created["name"], "name");
    assert_eq!(created["address"], "US");
    assert!(created["id"].is_i64());
}

#[tokio::test]
async fn test_create_with_taken_email_returns_conflict() {
    let app = test_app();
    let email = random_email();
    create_customer(&app, "name", &email, "US").await;

    let response = send(
        &app,
        json_request(
            "POST",
            API_CUSTOMER_PATH,
            &json!({ "name": "other", "email": email, "address": "RU" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_string(response).await,
        format!("The email {email} unavailable.")
    );

    // The customer set is unchanged
    let customers = body_json(send(&app, empty_request("GET", API_CUSTOMER_PATH)).await).await;
    assert_eq!(customers.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_customer_by_id() {
    let app = test_app();
    let email = random_email();
    let id = create_customer(&app, "name", &email, "US").await;

    let response = send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}/{id}"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let customer = body_json(response).await;
    assert_eq!(customer["id"].as_i64(), Some(id));
    assert_eq!(customer["name"], "name");
    assert_eq!(customer["email"], email.as_str());
    assert_eq!(customer["address"], "US");
}

#[tokio::test]
async fn test_get_unknown_customer_returns_not_found() {
    let app = test_app();

    let response = send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}/999"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        "Customer with id 999 doesn't found"
    );
}

#[tokio::test]
async fn test_update_customer_email_only() {
    let app = test_app();
    let email = random_email();
    let id = create_customer(&app, "name", &email, "US").await;

    let new_email = random_email();
    let response = send(
        &app,
        empty_request(
            "PUT",
            &format!("{API_CUSTOMER_PATH}/{id}?email={new_email}"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let customer =
        body_json(send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}/{id}"))).await)
            .await;
    assert_eq!(customer["name"], "name");
    assert_eq!(customer["email"], new_email.as_str());
    assert_eq!(customer["address"], "US");
}

#[tokio::test]
async fn test_update_without_parameters_is_a_no_op() {
    let app = test_app();
    let email = random_email();
    let id = create_customer(&app, "name", &email, "US").await;

    let response = send(&app, empty_request("PUT", &format!("{API_CUSTOMER_PATH}/{id}"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let customer =
        body_json(send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}/{id}"))).await)
            .await;
    assert_eq!(customer["name"], "name");
    assert_eq!(customer["email"], email.as_str());
    assert_eq!(customer["address"], "US");
}

#[tokio::test]
async fn test_update_unknown_customer_returns_not_found() {
    let app = test_app();

    let response = send(
        &app,
        empty_request("PUT", &format!("{API_CUSTOMER_PATH}/42?name=leon")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        "Customer with id 42 doesn't found"
    );
}

#[tokio::test]
async fn test_update_with_colliding_email_returns_conflict() {
    let app = test_app();
    let first_email = random_email();
    let second_email = random_email();
    create_customer(&app, "first", &first_email, "US").await;
    let second_id = create_customer(&app, "second", &second_email, "US").await;

    let response = send(
        &app,
        empty_request(
            "PUT",
            &format!("{API_CUSTOMER_PATH}/{second_id}?email={first_email}"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_string(response).await,
        format!("The email \"{first_email}\" unavailable to update")
    );

    // Nothing was persisted
    let customer = body_json(
        send(
            &app,
            empty_request("GET", &format!("{API_CUSTOMER_PATH}/{second_id}")),
        )
        .await,
    )
    .await;
    assert_eq!(customer["email"], second_email.as_str());
}

#[tokio::test]
async fn test_delete_customer_then_get_returns_not_found() {
    let app = test_app();
    let email = random_email();
    let id = create_customer(&app, "name", &email, "US").await;

    let response = send(
        &app,
        empty_request("DELETE", &format!("{API_CUSTOMER_PATH}/{id}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}/{id}"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_customer_returns_not_found() {
    let app = test_app();

    let response = send(&app, empty_request("DELETE", &format!("{API_CUSTOMER_PATH}/7"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        "Customer with id 7 doesn't exist."
    );
}

#[tokio::test]
async fn test_list_filtered_by_address() {
    let app = test_app();
    create_customer(&app, "us-1", &random_email(), "US").await;
    create_customer(&app, "us-2", &random_email(), "US").await;
    create_customer(&app, "ru-1", &random_email(), "RU").await;

    let response = send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}?address=US"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let customers = body_json(response).await;
    let customers = customers.as_array().unwrap();
    assert_eq!(customers.len(), 2);
    assert!(customers.iter().all(|c| c["address"] == "US"));
}

#[tokio::test]
async fn test_full_customer_lifecycle() {
    let app = test_app();

    // Create
    let response = send(
        &app,
        json_request(
            "POST",
            API_CUSTOMER_PATH,
            &json!({ "name": "name", "email": "e1@x.com", "address": "US" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Listed
    let customers = body_json(send(&app, empty_request("GET", API_CUSTOMER_PATH)).await).await;
    let id = customers
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["email"] == "e1@x.com")
        .and_then(|c| c["id"].as_i64())
        .unwrap();

    // Update the email
    let response = send(
        &app,
        empty_request("PUT", &format!("{API_CUSTOMER_PATH}/{id}?email=e2@x.com")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let customer =
        body_json(send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}/{id}"))).await)
            .await;
    assert_eq!(customer["name"], "name");
    assert_eq!(customer["email"], "e2@x.com");
    assert_eq!(customer["address"], "US");

    // Delete
    let response = send(
        &app,
        empty_request("DELETE", &format!("{API_CUSTOMER_PATH}/{id}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, empty_request("GET", &format!("{API_CUSTOMER_PATH}/{id}"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app();

    let response = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");

    // In-memory store has no database to ping
    let response = send(&app, empty_request("GET", "/health/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_then_lookup_returns_exact_fields() {
    let app = test_app();
    let email = random_email();

    send(
        &app,
        json_request(
            "POST",
            API_CUSTOMER_PATH,
            &json!({ "name": "juan", "email": email, "address": "us" }),
        ),
    )
    .await;

    let customers: Value =
        body_json(send(&app, empty_request("GET", API_CUSTOMER_PATH)).await).await;
    let created = customers
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["email"] == email.as_str())
        .cloned()
        .unwrap();

    assert_eq!(created["name"], "juan");
    assert_eq!(created["email"], email.as_str());
    assert_eq!(created["address"], "us");
}
