//! Shared helpers for the HTTP integration tests.
//!
//! The app is wired exactly as in production except that every adapter is
//! in-memory and bcrypt runs at its minimum cost.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};
use taskboard::Trace;
use taskboard::domain::{AccountService, OperationDeadline, TodoService};
use taskboard::inbound::http::state::HttpState;
use taskboard::inbound::http::{configure_api, json_config};
use taskboard::outbound::cache::InMemoryUserCache;
use taskboard::outbound::credentials::{BcryptPasswordHasher, JwtTokenCodec, MIN_BCRYPT_COST};
use taskboard::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};

const SECRET: &str = "integration-secret";

/// Handler state backed by fresh in-memory adapters.
pub fn in_memory_state() -> HttpState {
    let clock = Arc::new(DefaultClock);
    let deadline = OperationDeadline::new(Duration::from_secs(5));
    let tokens = Arc::new(JwtTokenCodec::new(SECRET, clock.clone()));
    let todos = Arc::new(TodoService::new(
        Arc::new(InMemoryTaskRepository::new(clock.clone())),
        deadline,
    ));
    let accounts = Arc::new(
        AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryUserCache::new(clock)),
            Arc::new(BcryptPasswordHasher::new(MIN_BCRYPT_COST)),
            tokens.clone(),
        )
        .with_deadline(deadline),
    );
    HttpState::new(todos.clone(), todos, accounts.clone(), accounts, tokens)
}

pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(in_memory_state()))
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Status, headers and decoded JSON body of a response.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

pub async fn send<S, R>(app: &S, request: R) -> Reply
where
    S: Service<R, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply {
        status,
        headers,
        body,
    }
}

pub fn signup_request(username: &str, email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/signup")
        .set_json(json!({ "username": username, "email": email, "password": password }))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": password }))
}

/// Attach a bearer token.
pub fn authed(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Sign up and log in; returns the bearer token.
pub async fn register<S, R>(app: &S, requests: (R, R)) -> String
where
    S: Service<R, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (signup, login) = requests;
    let created = send(app, signup).await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let logged_in = send(app, login).await;
    assert_eq!(logged_in.status, StatusCode::ACCEPTED, "{}", logged_in.body);
    logged_in.body["token"]
        .as_str()
        .expect("token string")
        .to_owned()
}
