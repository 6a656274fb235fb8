//! Tests for account API handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{
    AccessToken, EmailAddress, INVALID_CREDENTIALS, PasswordDigest, ProfileSource, User, UserId,
    Username,
};
use crate::inbound::http::json_config;
use crate::inbound::http::test_utils::{TestPorts, bearer_header};

fn profile_for(id: &UserId) -> UserProfile {
    User::new(
        id.clone(),
        Username::new("ada").expect("valid username"),
        EmailAddress::new("ada@example.com").expect("valid email"),
        PasswordDigest::new("$2b$04$digest").expect("valid digest"),
    )
    .to_profile()
}

fn test_app(
    ports: TestPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .app_data(json_config())
        .service(
            web::scope("/api/v1")
                .service(signup)
                .service(login)
                .service(get_profile),
        )
}

async fn post_json(ports: TestPorts, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let value: Value = actix_test::read_body_json(response).await;
    (status, value)
}

#[actix_web::test]
async fn signup_returns_created_profile() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_sign_up()
        .withf(|details| details.email().as_ref() == "ada@example.com")
        .times(1)
        .returning(|_| Ok(profile_for(&UserId::random())));

    let (status, body) = post_json(
        ports,
        "/api/v1/signup",
        json!({ "username": "ada", "email": "Ada@Example.com", "password": "pw" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "ada");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password").is_none());
}

#[rstest]
#[case(json!({ "username": " ", "email": "ada@example.com", "password": "pw" }), "username")]
#[case(json!({ "username": "ada", "email": "not-an-email", "password": "pw" }), "email")]
#[case(json!({ "username": "ada", "email": "ada@example.com", "password": "" }), "password")]
#[actix_web::test]
async fn signup_validation_names_the_field(#[case] body: Value, #[case] field: &str) {
    let mut ports = TestPorts::default();
    ports.accounts.expect_sign_up().never();

    let (status, value) = post_json(ports, "/api/v1/signup", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
}

#[actix_web::test]
async fn signup_conflict_maps_to_409() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_sign_up()
        .returning(|_| Err(Error::conflict("email ada@example.com is already registered")));

    let (status, body) = post_json(
        ports,
        "/api/v1/signup",
        json!({ "username": "ada", "email": "ada@example.com", "password": "pw" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn malformed_body_is_a_json_bad_request() {
    let mut ports = TestPorts::default();
    ports.accounts.expect_login().never();

    let (status, body) = post_json(ports, "/api/v1/login", json!({ "email": 7 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn login_returns_accepted_with_token() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_login()
        .withf(|creds| creds.password() == "pw")
        .returning(|_| Ok(AccessToken::new("signed.jwt.token")));

    let (status, body) = post_json(
        ports,
        "/api/v1/login",
        json!({ "email": "ada@example.com", "password": "pw" }),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], LOGIN_SUCCESS);
    assert_eq!(body["token"], "signed.jwt.token");
}

#[actix_web::test]
async fn rejected_login_is_a_bad_request() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_login()
        .returning(|_| Err(Error::invalid_request(INVALID_CREDENTIALS)));

    let (status, body) = post_json(
        ports,
        "/api/v1/login",
        json!({ "email": "ada@example.com", "password": "wrong" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_CREDENTIALS);
}

#[rstest]
#[case(ProfileSource::Cache, "cache")]
#[case(ProfileSource::Store, "store")]
#[actix_web::test]
async fn profile_reports_its_source(#[case] source: ProfileSource, #[case] label: &str) {
    let user_id = UserId::random();
    let expected_id = user_id.clone();
    let mut ports = TestPorts::default();
    ports
        .profiles
        .expect_get_profile()
        .withf(move |id| id == &expected_id)
        .returning(move |id| Ok((profile_for(id), source)));

    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/user/get/profile")
        .insert_header(("Authorization", bearer_header(&user_id)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(PROFILE_SOURCE_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(label)
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], user_id.to_string());
}

#[actix_web::test]
async fn profile_requires_a_token() {
    let mut ports = TestPorts::default();
    ports.profiles.expect_get_profile().never();

    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/user/get/profile")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
