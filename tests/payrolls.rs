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

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = test::call_service($app, req).await;
        assert!(resp.status().is_success(), "POST {} failed: {:?}", $uri, resp.status());
        let created: Value = test::read_body_json(resp).await;
        created
    }};
}

macro_rules! seed_employee {
    ($app:expr) => {{
        let employee = post_json!(
            $app,
            "/employees",
            json!({ "name": "Ada", "cpf": "1", "position": "Engineer", "admission_date": "2024-01-01" })
        );
        employee["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn create_then_get_round_trip() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let employee_id = seed_employee!(&app);

    let created = post_json!(
        &app,
        "/pay_rolls",
        json!({
            "employee_id": employee_id,
            "gross_salary": 5000.0,
            "deductions": 750.0,
            "net_salary": 4250.0,
            "reference_month": "2024-06"
        })
    );

    let id = created["id"].as_i64().expect("generated id");
    assert_eq!(created["employee_id"], employee_id);
    assert_eq!(created["gross_salary"], 5000.0);
    assert_eq!(created["deductions"], 750.0);
    assert_eq!(created["net_salary"], 4250.0);
    assert_eq!(created["reference_month"], "2024-06");

    let req = test::TestRequest::get()
        .uri(&format!("/pay_rolls/{}", id))
        .to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn amounts_are_stored_as_given_without_arithmetic_checks() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let employee_id = seed_employee!(&app);

    // net does not equal gross minus deductions; the record is kept as-is
    let created = post_json!(
        &app,
        "/pay_rolls",
        json!({
            "employee_id": employee_id,
            "gross_salary": 5000.0,
            "deductions": 750.0,
            "net_salary": 9999.0,
            "reference_month": "2024-06"
        })
    );
    assert_eq!(created["net_salary"], 9999.0);
}

#[actix_web::test]
async fn create_with_missing_employee_is_rejected() {
    let pool = common::test_pool().await;
    let app = app!(pool.clone());

    let req = test::TestRequest::post()
        .uri("/pay_rolls")
        .set_json(json!({
            "employee_id": 999,
            "gross_salary": 5000.0,
            "deductions": 750.0,
            "net_salary": 4250.0,
            "reference_month": "2024-06"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee not found");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payroll")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn partial_update_changes_only_supplied_fields() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let employee_id = seed_employee!(&app);

    let created = post_json!(
        &app,
        "/pay_rolls",
        json!({
            "employee_id": employee_id,
            "gross_salary": 5000.0,
            "deductions": 750.0,
            "net_salary": 4250.0,
            "reference_month": "2024-06"
        })
    );
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/pay_rolls/{}", id))
        .set_json(json!({ "deductions": 800.0, "net_salary": 4200.0 }))
        .to_request();
    let updated: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(updated["deductions"], 800.0);
    assert_eq!(updated["net_salary"], 4200.0);
    assert_eq!(updated["gross_salary"], 5000.0);
    assert_eq!(updated["reference_month"], "2024-06");
}

#[actix_web::test]
async fn update_revalidates_employee_when_supplied() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let employee_id = seed_employee!(&app);

    let created = post_json!(
        &app,
        "/pay_rolls",
        json!({
            "employee_id": employee_id,
            "gross_salary": 5000.0,
            "deductions": 750.0,
            "net_salary": 4250.0,
            "reference_month": "2024-06"
        })
    );
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/pay_rolls/{}", id))
        .set_json(json!({ "employee_id": 999 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee not found");
}

#[actix_web::test]
async fn update_of_missing_payroll_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::put()
        .uri("/pay_rolls/42")
        .set_json(json!({ "deductions": 1.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Payroll not found");
}

#[actix_web::test]
async fn delete_then_get_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let employee_id = seed_employee!(&app);

    let created = post_json!(
        &app,
        "/pay_rolls",
        json!({
            "employee_id": employee_id,
            "gross_salary": 5000.0,
            "deductions": 750.0,
            "net_salary": 4250.0,
            "reference_month": "2024-06"
        })
    );
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/pay_rolls/{}", id))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get()
        .uri(&format!("/pay_rolls/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn count_and_paginate() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let employee_id = seed_employee!(&app);

    for month in 1..=12 {
        post_json!(
            &app,
            "/pay_rolls",
            json!({
                "employee_id": employee_id,
                "gross_salary": 5000.0,
                "deductions": 750.0,
                "net_salary": 4250.0,
                "reference_month": format!("2024-{:02}", month)
            })
        );
    }

    let req = test::TestRequest::get().uri("/pay_rolls/count").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["count"], 12);

    let req = test::TestRequest::get()
        .uri("/pay_rolls/paginated?page=2&limit=10")
        .to_request();
    let page: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page.as_array().unwrap().len(), 2);
}
