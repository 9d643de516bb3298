use actix_web::{App, http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::json;

use farmpay::routes;

mod common;
use common::{MockData, TestAssertions, app_data};

macro_rules! init_app {
    () => {{
        let (repo, config) = app_data();
        test::init_service(
            App::new()
                .app_data(repo)
                .app_data(config)
                .configure(routes::configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_preview_totals_and_lines() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/preview")
        .set_json(json!({
            "details": MockData::month_of_work(),
            "deduction": "50"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let data = TestAssertions::assert_success_response(&body);

    TestAssertions::assert_amount(&data["summary"]["raiAmount"], "1000");
    TestAssertions::assert_amount(&data["summary"]["repairAmount"], "300");
    TestAssertions::assert_amount(&data["summary"]["dailyAmount"], "250");
    TestAssertions::assert_amount(&data["summary"]["grossAmount"], "1550");
    assert_eq!(data["summary"]["repairDays"], 1);
    TestAssertions::assert_amount(&data["netAmount"], "1500");

    let lines = data["lines"].as_array().expect("lines should be an array");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["taskId"], "t-1");
    assert_eq!(lines[0]["label"], "area-rate");
    assert_eq!(lines[1]["label"], "repair");
    assert_eq!(lines[2]["label"], "daily-rate");
    TestAssertions::assert_amount(&lines[2]["amount"], "250");
}

#[actix_web::test]
async fn test_preview_allows_negative_net() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/preview")
        .set_json(json!({
            "details": MockData::month_of_work(),
            "deduction": "2,000"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let data = TestAssertions::assert_success_response(&body);
    TestAssertions::assert_amount(&data["netAmount"], "-450");
}

#[actix_web::test]
async fn test_preview_rejects_negative_deduction() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/preview")
        .set_json(json!({ "details": [], "deduction": -10 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let message = TestAssertions::assert_error_response(&body);
    assert!(message.contains("deduction"), "unexpected message: {message}");
}

#[actix_web::test]
async fn test_resolve_single_line() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/lines/resolve")
        .set_json(MockData::per_rai("t-9", "12", "350"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let data = TestAssertions::assert_success_response(&body);
    assert_eq!(data["label"], "area-rate");
    TestAssertions::assert_amount(&data["amount"], "4200");
    assert_eq!(data["formula"], "12 rai × 350");
}

#[actix_web::test]
async fn test_resolve_unknown_pay_type_is_zero() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/lines/resolve")
        .set_json(json!({ "jobType": "field", "workerPayType": "hourly", "dailyRate": "300" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let data = TestAssertions::assert_success_response(&body);
    assert_eq!(data["label"], "amount");
    TestAssertions::assert_amount(&data["amount"], "0");
}

#[actix_web::test]
async fn test_prorate_splits_across_assignees() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/prorate")
        .set_json(json!({
            "ratePerRai": "100",
            "repairRate": 450,
            "assignees": [
                { "username": "somchai" },
                { "username": "malee", "useDefault": true },
                { "username": "anan", "isDaily": true, "dailyRate": "400" }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let data = TestAssertions::assert_success_response(&body);
    TestAssertions::assert_amount(&data["shares"]["ratePerRai"], "33.33");
    TestAssertions::assert_amount(&data["shares"]["repairRate"], "150");

    let assignees = data["assignees"].as_array().expect("assignees should be an array");
    assert_eq!(assignees.len(), 3);
    for assignee in assignees {
        assert_eq!(assignee["useDefault"], false);
        TestAssertions::assert_amount(&assignee["ratePerRai"], "33.33");
    }
    TestAssertions::assert_amount(&assignees[2]["dailyRate"], "400");
}

#[actix_web::test]
async fn test_prorate_without_assignees_fails() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/prorate")
        .set_json(json!({ "ratePerRai": "300", "assignees": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let message = TestAssertions::assert_error_response(&body);
    assert!(message.contains("assignees"), "unexpected message: {message}");
}

#[actix_web::test]
async fn test_malformed_json_gets_error_envelope() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/preview")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"details\": [")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    TestAssertions::assert_error_response(&body);
}

#[actix_web::test]
async fn test_create_slip_rejects_negative_deduction() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/slips")
        .set_json(json!({
            "userId": "worker-12",
            "month": "2024-10",
            "deduction": "-5",
            "details": MockData::month_of_work()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    TestAssertions::assert_error_response(&body);
}

#[actix_web::test]
async fn test_create_slip_rejects_blank_user() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/slips")
        .set_json(json!({
            "userId": "  ",
            "month": "2024-10",
            "details": MockData::month_of_work()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let message = TestAssertions::assert_error_response(&body);
    assert!(message.contains("userId"), "unexpected message: {message}");
}

#[actix_web::test]
async fn test_create_slip_rejects_invalid_month() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/slips")
        .set_json(json!({
            "userId": "worker-12",
            "month": "2024-13",
            "details": []
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    TestAssertions::assert_error_response(&body);
}

#[actix_web::test]
async fn test_list_slips_rejects_invalid_month() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/payroll/slips?month=October")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let message = TestAssertions::assert_error_response(&body);
    assert!(message.contains("YYYY-MM"), "unexpected message: {message}");
}

#[actix_web::test]
async fn test_prorate_without_task_rates_fails() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/prorate")
        .set_json(json!({ "assignees": [{ "username": "somchai" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let message = TestAssertions::assert_error_response(&body);
    assert!(message.contains("ratePerRai"), "unexpected message: {message}");
}

#[actix_web::test]
async fn test_effective_rates_follow_use_default() {
    let app = init_app!();
    let standing = json!({ "ratePerRai": "300", "repairRate": "250", "dailyRate": "400" });

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/rates/effective")
        .set_json(json!({
            "assignee": { "username": "malee", "isDaily": true, "dailyRate": "999" },
            "standing": standing
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let data = TestAssertions::assert_success_response(&body);
    assert_eq!(data["username"], "malee");
    assert_eq!(data["payType"], "daily");
    TestAssertions::assert_amount(&data["rates"]["dailyRate"], "400");

    let req = test::TestRequest::post()
        .uri("/api/v1/payroll/rates/effective")
        .set_json(json!({
            "assignee": { "username": "anan", "useDefault": false, "ratePerRai": "120.50" },
            "standing": standing
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let data = TestAssertions::assert_success_response(&body);
    assert_eq!(data["payType"], "per_rai");
    TestAssertions::assert_amount(&data["rates"]["ratePerRai"], "120.50");
    TestAssertions::assert_amount(&data["rates"]["dailyRate"], "0");
}

#[actix_web::test]
async fn test_bad_status_filter_gets_error_envelope() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/payroll/slips?status=bogus")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    TestAssertions::assert_error_response(&body);
}

#[actix_web::test]
async fn test_bad_slip_id_gets_error_envelope() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/payroll/slips/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    TestAssertions::assert_error_response(&body);
}
