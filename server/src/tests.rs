use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use entity::employee::Gender;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, NewEmployee, departments, employees};
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{
    config::AppConfig,
    forms::{D_ID_UNKNOWN, EMP_NAME_RULE, EMP_NAME_TAKEN},
    http::{AppState, build_router},
};

const FORM: &str = "application/x-www-form-urlencoded";

async fn app() -> (Router, DbPool) {
    let pool = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    departments::insert(&pool, "Development").await.unwrap();
    let state = AppState::new(pool.clone(), Arc::new(AppConfig::default()));
    (build_router(state), pool)
}

async fn seed_employees(pool: &DbPool, count: usize) {
    let rows = (1..=count)
        .map(|i| NewEmployee {
            emp_name: format!("member_{i:02}"),
            gender: Gender::Male,
            email: format!("member_{i:02}@example.com"),
            d_id: Some(1),
        })
        .collect();
    employees::insert_batch(pool, rows).await.unwrap();
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn form(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, FORM)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let (router, _pool) = app().await;
    let (status, body) = send(
        &router,
        form(
            "POST",
            "/emp",
            "empName=jerry_01&gender=F&email=jerry%40example.com&dId=1",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 100, "msg": "success"}));

    let (_, page) = send(&router, get("/emps")).await;
    let emp_id = page["pageInfo"]["list"][0]["empId"].as_i64().unwrap();

    let (status, body) = send(&router, get(&format!("/emp/{emp_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["emp"],
        json!({
            "empId": emp_id,
            "empName": "jerry_01",
            "gender": "F",
            "email": "jerry@example.com",
            "dId": 1,
            "department": {"did": 1, "deptName": "Development"}
        })
    );
}

#[tokio::test]
async fn create_reports_every_invalid_field() {
    let (router, _pool) = app().await;
    let (status, body) = send(&router, form("POST", "/emp", "empName=&gender=M&email=nope")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    let fields = body["errorFields"].as_object().unwrap();
    assert!(fields.contains_key("empName"));
    assert!(fields.contains_key("email"));
    assert!(!fields.contains_key("gender"));
}

#[tokio::test]
async fn create_with_taken_name_fails_on_empname() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;
    let (_, body) = send(
        &router,
        form("POST", "/emp", "empName=member_01&gender=M&email=m%40example.com"),
    )
    .await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["errorFields"], json!({"empName": EMP_NAME_TAKEN}));
}

#[tokio::test]
async fn checkuser_validates_format_then_availability() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;

    let (_, body) = send(&router, get("/checkuser?empName=ab")).await;
    assert_eq!(body, json!({"code": 200, "msg": "fail", "va_msg": EMP_NAME_RULE}));

    let (_, body) = send(&router, get("/checkuser?empName=member_01")).await;
    assert_eq!(body["va_msg"], EMP_NAME_TAKEN);

    let (_, body) = send(&router, get("/checkuser?empName=free_name")).await;
    assert_eq!(body, json!({"code": 100, "msg": "success"}));

    let (_, body) = send(
        &router,
        form("POST", "/checkuser", "empName=%E5%BC%A0%E4%B8%89"),
    )
    .await;
    assert_eq!(body["code"], 100);
}

#[tokio::test]
async fn checkuser_without_name_is_a_client_error() {
    let (router, _pool) = app().await;
    let (status, body) = send(&router, get("/checkuser")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 200);
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let (router, pool) = app().await;
    seed_employees(&pool, 2).await;

    let (status, body) = send(&router, delete("/emp/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 100);

    let (status, body) = send(&router, get("/emp/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 200);
    assert!(body.get("emp").is_none());

    let (status, _) = send(&router, delete("/emp/1")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn batch_delete_leaves_unlisted_rows() {
    let (router, pool) = app().await;
    seed_employees(&pool, 5).await;

    let (_, body) = send(&router, delete("/emp/1-3-5-42")).await;
    assert_eq!(body["code"], 100);

    let (_, page) = send(&router, get("/emps")).await;
    let ids = page["pageInfo"]["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|emp| emp["empId"].as_i64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 4]);
    assert_eq!(page["pageInfo"]["total"], 2);
}

#[tokio::test]
async fn malformed_ids_are_rejected_with_an_envelope() {
    let (router, _pool) = app().await;
    for uri in ["/emp/abc", "/emp/1--2", "/emp/0", "/emp/-4"] {
        let (status, body) = send(&router, delete(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 200, "{uri}");
    }
    let (status, _) = send(&router, get("/emp/x1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn selective_update_changes_only_email() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;

    let (_, body) = send(&router, form("PUT", "/emp/1", "email=x%40y.com")).await;
    assert_eq!(body, json!({"code": 100, "msg": "success"}));

    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["email"], "x@y.com");
    assert_eq!(body["emp"]["empName"], "member_01");
    assert_eq!(body["emp"]["gender"], "M");
    assert_eq!(body["emp"]["dId"], 1);
}

#[tokio::test]
async fn update_without_fields_is_a_no_op() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;

    let (status, body) = send(&router, form("PUT", "/emp/1", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 100);

    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["email"], "member_01@example.com");
}

#[tokio::test]
async fn update_without_body_or_content_type_is_a_no_op() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;

    let request = Request::builder()
        .method("PUT")
        .uri("/emp/1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 100, "msg": "success"}));
}

#[tokio::test]
async fn update_binds_query_string_fields() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;

    let request = Request::builder()
        .method("PUT")
        .uri("/emp/1?email=x%40y.com")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&router, request).await;
    assert_eq!(body["code"], 100);
    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["email"], "x@y.com");

    let (_, body) = send(
        &router,
        form("PUT", "/emp/1?email=q%40y.com&gender=F", "email=b%40y.com"),
    )
    .await;
    assert_eq!(body["code"], 100);
    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["email"], "b@y.com");
    assert_eq!(body["emp"]["gender"], "F");
}

#[tokio::test]
async fn create_binds_query_string_fields() {
    let (router, _pool) = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/emp?empName=query_01&gender=M&email=q%40example.com")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&router, request).await;
    assert_eq!(body, json!({"code": 100, "msg": "success"}));

    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["empName"], "query_01");
}

#[tokio::test]
async fn update_to_a_taken_name_keeps_the_row() {
    let (router, pool) = app().await;
    seed_employees(&pool, 2).await;

    let (status, body) = send(&router, form("PUT", "/emp/1", "empName=member_02")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["errorFields"], json!({"empName": EMP_NAME_TAKEN}));

    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["empName"], "member_01");
}

#[tokio::test]
async fn unknown_department_is_a_field_error() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;
    let (status, body) = send(
        &router,
        form("POST", "/emp", "empName=orphan_01&gender=M&email=o%40example.com&dId=99"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errorFields"], json!({"dId": D_ID_UNKNOWN}));

    let (_, body) = send(&router, form("PUT", "/emp/1", "dId=42")).await;
    assert_eq!(body["errorFields"], json!({"dId": D_ID_UNKNOWN}));
    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["dId"], 1);
}

#[tokio::test]
async fn blank_department_creates_without_one() {
    let (router, _pool) = app().await;
    let (_, body) = send(
        &router,
        form("POST", "/emp", "empName=loner_01&gender=F&email=l%40example.com&dId="),
    )
    .await;
    assert_eq!(body, json!({"code": 100, "msg": "success"}));

    let (_, body) = send(&router, get("/emp/1")).await;
    assert_eq!(body["emp"]["dId"], Value::Null);
    assert_eq!(body["emp"]["department"], Value::Null);
}

#[tokio::test]
async fn undecodable_path_keeps_the_envelope() {
    let (router, _pool) = app().await;
    for request in [get("/emp/%FF"), delete("/emp/%FF"), form("PUT", "/emp/%FF", "")] {
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 200);
        assert!(body["msg"].is_string());
    }
}

#[tokio::test]
async fn update_rejects_invalid_supplied_fields() {
    let (router, pool) = app().await;
    seed_employees(&pool, 1).await;

    let (_, body) = send(&router, form("PUT", "/emp/1", "gender=X")).await;
    assert_eq!(body["code"], 200);
    assert!(body["errorFields"]["gender"].is_string());
}

#[tokio::test]
async fn second_page_of_twelve() {
    let (router, pool) = app().await;
    seed_employees(&pool, 12).await;

    let (status, body) = send(&router, get("/emps?pn=2")).await;
    assert_eq!(status, StatusCode::OK);
    let page = &body["pageInfo"];
    assert_eq!(page["pageNum"], 2);
    assert_eq!(page["pages"], 3);
    assert_eq!(page["total"], 12);
    assert_eq!(page["navigatepageNums"], json!([1, 2, 3]));
    let names = page["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|emp| emp["empName"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["member_06", "member_07", "member_08", "member_09", "member_10"]
    );
    assert_eq!(page["list"][0]["department"]["deptName"], "Development");
}

#[tokio::test]
async fn html_list_renders_page() {
    let (router, pool) = app().await;
    seed_employees(&pool, 7).await;

    let response = router.clone().oneshot(get("/list?pn=2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("member_06"));
    assert!(!html.contains("member_05"));
    assert!(html.contains("Page 2 of 2, 7 records"));
}

#[tokio::test]
async fn departments_are_listed() {
    let (router, _pool) = app().await;
    let (_, body) = send(&router, get("/depts")).await;
    assert_eq!(
        body,
        json!({"code": 100, "msg": "success", "depts": [{"did": 1, "deptName": "Development"}]})
    );
}

#[tokio::test]
async fn health_reports_database() {
    let (router, _pool) = app().await;
    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["db_ok"], true);
}
