#![cfg(not(coverage))]

use super::*;
use httpmock::prelude::*;
use serde_json::json;

fn driver_json(id: &str, name: &str, on_duty: bool) -> serde_json::Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{}@ambutrack.example", id),
        "phone": "9876543210",
        "vehicleType": "Basic Life Support",
        "onDuty": on_duty
    })
}

fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api/v1"))
}

#[tokio::test]
async fn verify_returns_user_payload() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/verify");
        then.status(200)
            .json_body(json!({ "user": { "name": "Priya Sharma", "role": "customer" } }));
    });

    let verify = api_client(&server).verify().await.unwrap();
    assert_eq!(verify.user.name.as_deref(), Some("Priya Sharma"));
    assert_eq!(verify.user.role.as_deref(), Some("customer"));
}

#[tokio::test]
async fn verify_surfaces_backend_error_payload() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/verify");
        then.status(401)
            .json_body(json!({ "error": "Token expired", "code": "AUTH_EXPIRED" }));
    });

    let error = api_client(&server).verify().await.unwrap_err();
    assert_eq!(error.code, "AUTH_EXPIRED");
    assert_eq!(error.error, "Token expired");
}

#[tokio::test]
async fn login_hits_role_specific_endpoints() {
    let server = MockServer::start_async().await;
    let customer = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/customer/login")
            .json_body(json!({ "email": "c@example.com", "password": "secret1" }));
        then.status(200).json_body(json!({ "token": "cus-token" }));
    });
    let driver = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/driver/login")
            .json_body(json!({ "email": "d@example.com", "password": "secret2" }));
        then.status(200)
            .json_body(json!({ "token": "drv-token", "message": "welcome back" }));
    });

    let client = api_client(&server);
    let customer_login = client
        .login_as(
            Role::Customer,
            &LoginRequest {
                email: "c@example.com".into(),
                password: "secret1".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(customer_login.token, "cus-token");

    let driver_login = client
        .login_as(
            Role::Driver,
            &LoginRequest {
                email: "d@example.com".into(),
                password: "secret2".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(driver_login.token, "drv-token");
    assert_eq!(driver_login.message.as_deref(), Some("welcome back"));

    customer.assert_async().await;
    driver.assert_async().await;
}

#[tokio::test]
async fn login_failure_maps_plain_message_payload() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/customer/login");
        then.status(400).json_body(json!({ "message": "Invalid credentials" }));
    });

    let error = api_client(&server)
        .customer_login(&LoginRequest {
            email: "c@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(error.error, "Invalid credentials");
    assert_eq!(error.code, "400");
}

#[tokio::test]
async fn signup_posts_to_customer_and_driver_endpoints() {
    let server = MockServer::start_async().await;
    let customer = server.mock(|when, then| {
        when.method(POST).path("/api/v1/customer/signup");
        then.status(201).json_body(json!({ "message": "Account created" }));
    });
    let application = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/driver/signup")
            .json_body_partial(r#"{ "licenseNumber": "DL-0420110012345" }"#);
        then.status(201)
            .json_body(json!({ "message": "Application received" }));
    });

    let client = api_client(&server);
    let created = client
        .customer_signup(&SignupRequest {
            name: "Priya Sharma".into(),
            email: "priya@example.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.message, "Account created");

    let received = client
        .driver_application(&DriverApplicationRequest {
            name: "Arjun Mehta".into(),
            email: "arjun@example.com".into(),
            phone: "9876543210".into(),
            license_number: "DL-0420110012345".into(),
            vehicle_type: "Advanced Life Support".into(),
            vehicle_registration: "UP14 GT 2210".into(),
        })
        .await
        .unwrap();
    assert_eq!(received.message, "Application received");

    customer.assert_async().await;
    application.assert_async().await;
}

#[tokio::test]
async fn toggle_duty_puts_driver_id() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/driver/toggleDuty")
            .json_body(json!({ "id": "drv-1" }));
        then.status(200)
            .json_body(json!({ "message": "Duty updated", "onDuty": true }));
    });

    let status = api_client(&server).toggle_duty("drv-1").await.unwrap();
    assert_eq!(status.on_duty, Some(true));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_all_drivers_parses_records_and_find_filters_by_id() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/driver/getAll");
        then.status(200).json_body(json!([
            driver_json("drv-1", "Ravi Kumar", true),
            driver_json("drv-2", "Sana Iqbal", false)
        ]));
    });

    let client = api_client(&server);
    let drivers = client.get_all_drivers().await.unwrap();
    assert_eq!(drivers.len(), 2);
    assert!(drivers[0].on_duty);

    let found = client.find_driver("drv-2").await.unwrap();
    assert_eq!(found.map(|d| d.name), Some("Sana Iqbal".to_string()));

    let missing = client.find_driver("drv-404").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn get_requests_retry_server_errors_up_to_three_attempts() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/driver/getAll");
        then.status(500).json_body(json!({ "message": "boom" }));
    });

    let error = api_client(&server).get_all_drivers().await.unwrap_err();
    assert_eq!(error.error, "boom");
    assert_eq!(mock.hits_async().await, 3);
}

#[tokio::test]
async fn mutating_requests_are_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/api/v1/driver/toggleDuty");
        then.status(500).json_body(json!({ "message": "boom" }));
    });

    let error = api_client(&server).toggle_duty("drv-1").await.unwrap_err();
    assert_eq!(error.error, "boom");
    assert_eq!(mock.hits_async().await, 1);
}
