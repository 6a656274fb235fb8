//! Tests for task API handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{
    TASK_NOT_FOUND_OR_UNAUTHORIZED, TaskId, TaskPage, TaskPriority, TaskStatus, TaskTitle, UserId,
};
use crate::inbound::http::json_config;
use crate::inbound::http::test_utils::{TestPorts, bearer_header};

#[fixture]
fn caller() -> UserId {
    UserId::random()
}

fn task_for(owner: &UserId, id: i64, title: &str) -> Task {
    let at = Utc
        .with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    Task {
        id: TaskId::new(id).expect("valid id"),
        user_id: owner.clone(),
        title: TaskTitle::new(title).expect("valid title"),
        description: None,
        priority: TaskPriority::default(),
        status: TaskStatus::default(),
        due_at: None,
        created_at: at,
        updated_at: at,
    }
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
                .service(create_todo)
                .service(list_todos)
                .service(update_todo)
                .service(delete_todo),
        )
}

async fn send(
    ports: TestPorts,
    request: actix_test::TestRequest,
    caller: &UserId,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = request
        .insert_header(("Authorization", bearer_header(caller)))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn create_passes_labels_through_and_returns_201(caller: UserId) {
    let owner = caller.clone();
    let mut ports = TestPorts::default();
    ports
        .todos
        .expect_create_todo()
        .withf(move |id, fields| {
            id == &owner
                && fields.title.as_ref() == "buy milk"
                && fields.priority.as_deref() == Some("HIGH")
                && fields.due_at.is_some()
        })
        .times(1)
        .returning(|owner, fields| {
            let mut task = task_for(owner, 1, fields.title.as_ref());
            task.priority = TaskPriority::High;
            Ok(task)
        });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post().uri("/api/v1/user/todos").set_json(json!({
            "title": "buy milk",
            "priority": "HIGH",
            "dueAt": "2024-06-02T08:00:00Z"
        })),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["userId"], caller.to_string());
    assert_eq!(body["priority"], "HIGH");
    assert_eq!(body["status"], "PENDING");
}

#[rstest]
#[case(json!({ "description": "no title" }), "title", "missing_field")]
#[case(json!({ "title": "  " }), "title", "invalid_value")]
#[case(json!({ "title": "ok", "dueAt": "next week" }), "dueAt", "invalid_timestamp")]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    caller: UserId,
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = TestPorts::default();
    ports.todos.expect_create_todo().never();

    let (status, value) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/user/todos")
            .set_json(body),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn list_returns_total_and_page(caller: UserId) {
    let owner = caller.clone();
    let mut ports = TestPorts::default();
    ports
        .todos_query
        .expect_list_todos()
        .withf(|_, request| request.status == "PENDING" && request.limit == 2)
        .returning(move |_, _| {
            Ok(TaskPage {
                tasks: vec![task_for(&owner, 3, "c"), task_for(&owner, 2, "b")],
                total_count: 3,
            })
        });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/user/todos/list")
            .set_json(json!({ "status": "PENDING", "limit": 2 })),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["todos"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["todos"][0]["id"], 3);
}

#[rstest]
#[actix_web::test]
async fn list_accepts_an_empty_object(caller: UserId) {
    let mut ports = TestPorts::default();
    ports
        .todos_query
        .expect_list_todos()
        .withf(|_, request| request == &ListTodosRequest::default())
        .returning(|_, _| Ok(TaskPage::default()));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/user/todos/list")
            .set_json(json!({})),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 0);
}

#[rstest]
#[actix_web::test]
async fn update_returns_the_replaced_task(caller: UserId) {
    let mut ports = TestPorts::default();
    ports
        .todos
        .expect_update_todo()
        .withf(|_, id, fields| id.get() == 5 && fields.status.as_deref() == Some("COMPLETED"))
        .returning(|owner, id, fields| {
            let mut task = task_for(owner, id.get(), fields.title.as_ref());
            task.status = TaskStatus::Completed;
            Ok(task)
        });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::patch()
            .uri("/api/v1/user/todos/5")
            .set_json(json!({ "title": "buy oat milk", "status": "COMPLETED" })),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "buy oat milk");
    assert_eq!(body["status"], "COMPLETED");
}

#[rstest]
#[actix_web::test]
async fn foreign_task_update_is_a_generic_500(caller: UserId) {
    let mut ports = TestPorts::default();
    ports
        .todos
        .expect_update_todo()
        .returning(|_, _, _| Err(Error::not_found_or_unauthorized(TASK_NOT_FOUND_OR_UNAUTHORIZED)));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::patch()
            .uri("/api/v1/user/todos/9")
            .set_json(json!({ "title": "mine now" })),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], TASK_NOT_FOUND_OR_UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn delete_acknowledges(caller: UserId) {
    let owner = caller.clone();
    let mut ports = TestPorts::default();
    ports
        .todos
        .expect_delete_todo()
        .withf(move |id, task_id| id == &owner && task_id.get() == 4)
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::delete().uri("/api/v1/user/todos/4"),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], TASK_DELETED);
}

#[rstest]
#[case("0")]
#[case("abc")]
#[actix_web::test]
async fn delete_rejects_bad_ids(caller: UserId, #[case] raw: &str) {
    let mut ports = TestPorts::default();
    ports.todos.expect_delete_todo().never();

    let (status, body) = send(
        ports,
        actix_test::TestRequest::delete().uri(&format!("/api/v1/user/todos/{raw}")),
        &caller,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_id");
}

#[actix_web::test]
async fn task_routes_require_a_token() {
    let mut ports = TestPorts::default();
    ports.todos.expect_create_todo().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/user/todos")
        .set_json(json!({ "title": "sneaky" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
