mod common;

use actix_web::middleware::NormalizePath;
use actix_web::{App, test, web::Data};
use hr_records::routes;
use serde_json::{Value, json};

macro_rules! app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(Data::new($pool.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! create_employee {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/employees")
            .set_json($body)
            .to_request();
        let resp = test::call_service($app, req).await;
        assert!(resp.status().is_success(), "create failed: {:?}", resp.status());
        let created: Value = test::read_body_json(resp).await;
        created
    }};
}

#[actix_web::test]
async fn create_then_get_round_trip() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let created = create_employee!(
        &app,
        json!({
            "name": "Ada Lovelace",
            "cpf": "123.456.789-00",
            "position": "Engineer",
            "admission_date": "2024-01-01"
        })
    );

    let id = created["id"].as_i64().expect("generated id");
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["cpf"], "123.456.789-00");
    assert_eq!(created["admission_date"], "2024-01-01");
    assert_eq!(created["department_id"], Value::Null);

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{}", id))
        .to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn create_with_missing_department_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool.clone());

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({
            "name": "Ada",
            "cpf": "1",
            "position": "Engineer",
            "admission_date": "2024-01-01",
            "department_id": 42
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn delete_then_get_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let created = create_employee!(
        &app,
        json!({
            "name": "Grace",
            "cpf": "2",
            "position": "Admiral",
            "admission_date": "2024-02-01"
        })
    );
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/employees/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn partial_update_changes_only_supplied_fields() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let created = create_employee!(
        &app,
        json!({
            "name": "Ada",
            "cpf": "123",
            "position": "Engineer",
            "admission_date": "2024-01-01"
        })
    );
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/employees/{}", id))
        .set_json(json!({ "position": "Staff Engineer" }))
        .to_request();
    let updated: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(updated["position"], "Staff Engineer");
    assert_eq!(updated["name"], "Ada");
    assert_eq!(updated["cpf"], "123");
    assert_eq!(updated["admission_date"], "2024-01-01");
}

#[actix_web::test]
async fn search_by_name_is_partial_and_case_insensitive() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    create_employee!(
        &app,
        json!({ "name": "Ada Lovelace", "cpf": "1", "position": "Engineer", "admission_date": "2024-01-01" })
    );
    create_employee!(
        &app,
        json!({ "name": "Alan Turing", "cpf": "2", "position": "Engineer", "admission_date": "2024-01-02" })
    );

    let req = test::TestRequest::get()
        .uri("/employees/search/lovelace")
        .to_request();
    let found: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Ada Lovelace");

    let req = test::TestRequest::get()
        .uri("/employees/search/nobody")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn combined_search_ands_name_and_position() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    create_employee!(
        &app,
        json!({ "name": "Ada Lovelace", "cpf": "1", "position": "Engineer", "admission_date": "2024-01-01" })
    );
    create_employee!(
        &app,
        json!({ "name": "Ada Byron", "cpf": "2", "position": "Analyst", "admission_date": "2024-01-02" })
    );

    let req = test::TestRequest::get()
        .uri("/employees/search?name=Ada&position=Analyst")
        .to_request();
    let found: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Ada Byron");
}

#[actix_web::test]
async fn filter_by_department_returns_members_only() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::post()
        .uri("/departments")
        .set_json(json!({ "name": "Engineering", "location": "HQ" }))
        .to_request();
    let department: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let department_id = department["id"].as_i64().unwrap();

    create_employee!(
        &app,
        json!({ "name": "Ada", "cpf": "1", "position": "Engineer", "admission_date": "2024-01-01", "department_id": department_id })
    );
    create_employee!(
        &app,
        json!({ "name": "Alan", "cpf": "2", "position": "Engineer", "admission_date": "2024-01-02" })
    );

    let req = test::TestRequest::get()
        .uri(&format!("/employees/department/{}", department_id))
        .to_request();
    let found: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Ada");
}

#[actix_web::test]
async fn admission_date_range_is_inclusive() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    for (name, date) in [
        ("Early", "2024-01-01"),
        ("Mid", "2024-06-15"),
        ("Late", "2024-12-31"),
        ("Outside", "2025-01-01"),
    ] {
        create_employee!(
            &app,
            json!({ "name": name, "cpf": name, "position": "Engineer", "admission_date": date })
        );
    }

    let req = test::TestRequest::get()
        .uri("/employees/admission-date-range?start_date=2024-01-01&end_date=2024-12-31")
        .to_request();
    let found: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let names: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Early", "Mid", "Late"]);
}

#[actix_web::test]
async fn count_and_paginate() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    for i in 0..15 {
        create_employee!(
            &app,
            json!({ "name": format!("Employee {i}"), "cpf": format!("{i}"), "position": "Engineer", "admission_date": "2024-01-01" })
        );
    }

    let req = test::TestRequest::get().uri("/employees/count").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["count"], 15);

    let req = test::TestRequest::get()
        .uri("/employees/paginated?page=2&limit=10")
        .to_request();
    let page: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page.as_array().unwrap().len(), 5);
}
