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

macro_rules! seed_employee_and_benefit {
    ($app:expr) => {{
        let employee = post_json!(
            $app,
            "/employees",
            json!({ "name": "Ada", "cpf": "1", "position": "Engineer", "admission_date": "2024-01-01" })
        );
        let benefit = post_json!(
            $app,
            "/benefits",
            json!({ "name": "Meal voucher", "amount": 150.0, "type": "Food" })
        );
        (
            employee["id"].as_i64().unwrap(),
            benefit["id"].as_i64().unwrap(),
        )
    }};
}

#[actix_web::test]
async fn create_then_get_round_trip() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let (employee_id, benefit_id) = seed_employee_and_benefit!(&app);

    let created = post_json!(
        &app,
        "/employee-benefits",
        json!({
            "employee_id": employee_id,
            "benefit_id": benefit_id,
            "start_date": "2024-02-01",
            "custom_amount": 175.0
        })
    );

    let id = created["id"].as_i64().expect("generated id");
    assert_eq!(created["employee_id"], employee_id);
    assert_eq!(created["benefit_id"], benefit_id);
    assert_eq!(created["start_date"], "2024-02-01");
    assert_eq!(created["end_date"], Value::Null);
    assert_eq!(created["custom_amount"], 175.0);

    let req = test::TestRequest::get()
        .uri(&format!("/employee-benefits/{}", id))
        .to_request();
    let fetched: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn create_with_missing_employee_is_rejected() {
    let pool = common::test_pool().await;
    let app = app!(pool.clone());
    let (_, benefit_id) = seed_employee_and_benefit!(&app);

    let req = test::TestRequest::post()
        .uri("/employee-benefits")
        .set_json(json!({
            "employee_id": 999,
            "benefit_id": benefit_id,
            "start_date": "2024-02-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee not found");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee_benefit")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn create_with_missing_benefit_is_rejected() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let (employee_id, _) = seed_employee_and_benefit!(&app);

    let req = test::TestRequest::post()
        .uri("/employee-benefits")
        .set_json(json!({
            "employee_id": employee_id,
            "benefit_id": 999,
            "start_date": "2024-02-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Benefit not found");
}

#[actix_web::test]
async fn update_revalidates_supplied_references() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let (employee_id, benefit_id) = seed_employee_and_benefit!(&app);

    let created = post_json!(
        &app,
        "/employee-benefits",
        json!({
            "employee_id": employee_id,
            "benefit_id": benefit_id,
            "start_date": "2024-02-01"
        })
    );
    let id = created["id"].as_i64().unwrap();

    // Pointing at a missing employee fails before anything is written
    let req = test::TestRequest::put()
        .uri(&format!("/employee-benefits/{}", id))
        .set_json(json!({ "employee_id": 999 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    // An end date and custom amount can be set without touching references
    let req = test::TestRequest::put()
        .uri(&format!("/employee-benefits/{}", id))
        .set_json(json!({ "end_date": "2024-12-31", "custom_amount": 200.0 }))
        .to_request();
    let updated: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(updated["employee_id"], employee_id);
    assert_eq!(updated["end_date"], "2024-12-31");
    assert_eq!(updated["custom_amount"], 200.0);

    // Explicit null clears the end date again
    let req = test::TestRequest::put()
        .uri(&format!("/employee-benefits/{}", id))
        .set_json(json!({ "end_date": null }))
        .to_request();
    let updated: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(updated["end_date"], Value::Null);
}

#[actix_web::test]
async fn update_of_missing_assignment_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::put()
        .uri("/employee-benefits/42")
        .set_json(json!({ "custom_amount": 10.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee benefit not found");
}

#[actix_web::test]
async fn delete_then_get_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let (employee_id, benefit_id) = seed_employee_and_benefit!(&app);

    let created = post_json!(
        &app,
        "/employee-benefits",
        json!({
            "employee_id": employee_id,
            "benefit_id": benefit_id,
            "start_date": "2024-02-01"
        })
    );
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/employee-benefits/{}", id))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get()
        .uri(&format!("/employee-benefits/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn count_and_paginate() {
    let pool = common::test_pool().await;
    let app = app!(pool);
    let (employee_id, benefit_id) = seed_employee_and_benefit!(&app);

    for day in 1..=12 {
        post_json!(
            &app,
            "/employee-benefits",
            json!({
                "employee_id": employee_id,
                "benefit_id": benefit_id,
                "start_date": format!("2024-03-{:02}", day)
            })
        );
    }

    let req = test::TestRequest::get()
        .uri("/employee-benefits/count")
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["count"], 12);

    let req = test::TestRequest::get()
        .uri("/employee-benefits/paginated?page=2&limit=10")
        .to_request();
    let page: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page.as_array().unwrap().len(), 2);
}
