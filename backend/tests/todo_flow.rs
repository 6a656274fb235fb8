//! End-to-end task flows over the in-memory adapters.

mod support;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};
use support::{Reply, authed, login_request, register, send, signup_request, test_app};

async fn user_token<S, R>(app: &S, name: &str, build: impl Fn(test::TestRequest) -> R) -> String
where
    S: Service<R, Response = ServiceResponse, Error = actix_web::Error>,
{
    let email = format!("{name}@example.com");
    register(
        app,
        (
            build(signup_request(name, &email, "long-enough-password")),
            build(login_request(&email, "long-enough-password")),
        ),
    )
    .await
}

fn create(token: &str, body: Value) -> test::TestRequest {
    authed(
        test::TestRequest::post()
            .uri("/api/v1/user/todos")
            .set_json(body),
        token,
    )
}

fn list(token: &str, body: Value) -> test::TestRequest {
    authed(
        test::TestRequest::post()
            .uri("/api/v1/user/todos/list")
            .set_json(body),
        token,
    )
}

fn update(token: &str, id: &Value, body: Value) -> test::TestRequest {
    authed(
        test::TestRequest::patch()
            .uri(&format!("/api/v1/user/todos/{id}"))
            .set_json(body),
        token,
    )
}

fn delete(token: &str, id: &Value) -> test::TestRequest {
    authed(
        test::TestRequest::delete().uri(&format!("/api/v1/user/todos/{id}")),
        token,
    )
}

fn titles(reply: &Reply) -> Vec<&str> {
    reply.body["todos"]
        .as_array()
        .expect("todos array")
        .iter()
        .filter_map(|task| task["title"].as_str())
        .collect()
}

#[actix_web::test]
async fn buy_milk_lifecycle() {
    let app = test::init_service(test_app()).await;
    let token = user_token(&app, "ada", |req| req.to_request()).await;

    let created = send(
        &app,
        create(
            &token,
            json!({ "title": "buy milk", "priority": "HIGH", "dueAt": "2024-06-01T09:00:00Z" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["title"], "buy milk");
    assert_eq!(created.body["priority"], "HIGH");
    assert_eq!(created.body["status"], "PENDING");
    assert_eq!(created.body["dueAt"], "2024-06-01T09:00:00Z");
    let id = created.body["id"].clone();

    let pending = send(&app, list(&token, json!({ "status": "PENDING" })).to_request()).await;
    assert_eq!(pending.status, StatusCode::OK);
    assert_eq!(pending.body["totalCount"], 1);
    assert_eq!(titles(&pending), ["buy milk"]);

    let updated = send(
        &app,
        update(
            &token,
            &id,
            json!({ "title": "buy oat milk", "priority": "HIGH", "status": "COMPLETED" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.body["status"], "COMPLETED");
    assert_eq!(updated.body["title"], "buy oat milk");
    assert_eq!(updated.body["createdAt"], created.body["createdAt"]);
    assert!(updated.body["dueAt"].is_null());

    let pending = send(&app, list(&token, json!({ "status": "PENDING" })).to_request()).await;
    assert_eq!(pending.body["totalCount"], 0);
    let completed = send(&app, list(&token, json!({ "status": "COMPLETED" })).to_request()).await;
    assert_eq!(titles(&completed), ["buy oat milk"]);

    let deleted = send(&app, delete(&token, &id).to_request()).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Todo deleted successfully");

    let remaining = send(&app, list(&token, json!({})).to_request()).await;
    assert_eq!(remaining.body["totalCount"], 0);
    assert_eq!(remaining.body["todos"], json!([]));
}

#[actix_web::test]
async fn listing_pages_newest_first() {
    let app = test::init_service(test_app()).await;
    let token = user_token(&app, "grace", |req| req.to_request()).await;
    for n in 1..=12 {
        let reply = send(
            &app,
            create(&token, json!({ "title": format!("task {n}") })).to_request(),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
    }

    let first_page = send(&app, list(&token, json!({ "limit": 0 })).to_request()).await;
    assert_eq!(first_page.body["totalCount"], 12);
    assert_eq!(titles(&first_page).len(), 10);
    assert_eq!(titles(&first_page)[0], "task 12");

    let tail = send(
        &app,
        list(&token, json!({ "status": "ALL", "limit": 5, "offset": 10 })).to_request(),
    )
    .await;
    assert_eq!(tail.body["totalCount"], 12);
    assert_eq!(titles(&tail), ["task 2", "task 1"]);

    let negative = send(
        &app,
        list(&token, json!({ "limit": 3, "offset": -4 })).to_request(),
    )
    .await;
    assert_eq!(titles(&negative), ["task 12", "task 11", "task 10"]);
}

#[actix_web::test]
async fn tasks_are_private_to_their_owner() {
    let app = test::init_service(test_app()).await;
    let owner = user_token(&app, "owner", |req| req.to_request()).await;
    let intruder = user_token(&app, "intruder", |req| req.to_request()).await;

    let created = send(&app, create(&owner, json!({ "title": "secret" })).to_request()).await;
    let id = created.body["id"].clone();

    let hijack = send(
        &app,
        update(&intruder, &id, json!({ "title": "mine now" })).to_request(),
    )
    .await;
    assert_eq!(hijack.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(hijack.body["code"], "not_found_or_unauthorized");
    assert_eq!(hijack.body["message"], "task not found or unauthorized");

    let removal = send(&app, delete(&intruder, &id).to_request()).await;
    assert_eq!(removal.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(removal.body["message"], hijack.body["message"]);

    let absent = send(&app, delete(&owner, &json!(987_654)).to_request()).await;
    assert_eq!(absent.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(absent.body["message"], hijack.body["message"]);

    let intruder_view = send(&app, list(&intruder, json!({})).to_request()).await;
    assert_eq!(intruder_view.body["totalCount"], 0);

    let owner_view = send(&app, list(&owner, json!({})).to_request()).await;
    assert_eq!(titles(&owner_view), ["secret"]);
}

#[actix_web::test]
async fn a_task_can_be_deleted_only_once() {
    let app = test::init_service(test_app()).await;
    let token = user_token(&app, "margaret", |req| req.to_request()).await;
    let created = send(&app, create(&token, json!({ "title": "file report" })).to_request()).await;
    let id = created.body["id"].clone();

    let first = send(&app, delete(&token, &id).to_request()).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = send(&app, delete(&token, &id).to_request()).await;
    assert_eq!(second.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(second.body["code"], "not_found_or_unauthorized");
    assert_eq!(second.body["message"], "task not found or unauthorized");
}

#[actix_web::test]
async fn null_status_lists_everything() {
    let app = test::init_service(test_app()).await;
    let token = user_token(&app, "barbara", |req| req.to_request()).await;
    send(&app, create(&token, json!({ "title": "a", "status": "COMPLETED" })).to_request()).await;
    send(&app, create(&token, json!({ "title": "b" })).to_request()).await;

    let reply = send(
        &app,
        list(&token, json!({ "status": null, "limit": null })).to_request(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    assert_eq!(reply.body["totalCount"], 2);
}

#[actix_web::test]
async fn unknown_labels_are_rejected() {
    let app = test::init_service(test_app()).await;
    let token = user_token(&app, "linus", |req| req.to_request()).await;

    let bad_priority = send(
        &app,
        create(&token, json!({ "title": "x", "priority": "URGENT" })).to_request(),
    )
    .await;
    assert_eq!(bad_priority.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_priority.body["code"], "invalid_request");

    let bad_filter = send(&app, list(&token, json!({ "status": "DONE" })).to_request()).await;
    assert_eq!(bad_filter.status, StatusCode::BAD_REQUEST);

    let blank_title = send(&app, create(&token, json!({ "title": "   " })).to_request()).await;
    assert_eq!(blank_title.status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn task_routes_need_a_token() {
    let app = test::init_service(test_app()).await;
    let reply = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/todos/list")
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}
