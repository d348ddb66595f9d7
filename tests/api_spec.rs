use axum::http::{header, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use crew_planner::api::{create_router, AppState};
use crew_planner::config::ExportConfig;
use planner_core::models::CreateClientInput;
use planner_core::{Database, DatabaseConfig, YearMonth};

struct Harness {
    _dir: tempfile::TempDir,
    db: Database,
    server: TestServer,
}

fn harness_with(export: ExportConfig) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DatabaseConfig::new(dir.path().join("api.db"))).unwrap();
    db.migrate().unwrap();
    let server = TestServer::new(create_router(AppState::new(db.clone(), export))).unwrap();
    Harness {
        _dir: dir,
        db,
        server,
    }
}

fn harness() -> Harness {
    harness_with(ExportConfig::default())
}

fn add_client(db: &Database, name: &str) -> i64 {
    db.create_client(CreateClientInput {
        name: name.into(),
        ..Default::default()
    })
    .unwrap()
    .id
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .header(header::LOCATION)
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn root_redirects_to_current_month() {
    let h = harness();
    let response = h.server.get("/").await;
    response.assert_status(StatusCode::SEE_OTHER);

    let today = chrono::Local::now();
    let expected = format!(
        "/{}/{}",
        chrono::Datelike::year(&today),
        chrono::Datelike::month(&today)
    );
    assert_eq!(location(&response), expected);
}

#[tokio::test]
async fn out_of_range_months_redirect_to_neighbouring_year() {
    let h = harness();

    let response = h.server.get("/2024/13").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/2025/1");

    let response = h.server.get("/2024/0").await;
    assert_eq!(location(&response), "/2023/12");
}

#[tokio::test]
async fn months_too_large_to_fold_are_bad_requests() {
    let h = harness();

    let response = h.server.get("/2024/9223372036854775807").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");

    h.server
        .get("/2024/-9223372036854775808")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn month_page_lists_clients_and_saved_plan() {
    let h = harness();
    let id = add_client(&h.db, "Acme");
    h.db.replace_month(
        YearMonth::new(2024, 3).unwrap(),
        &[planner_core::models::PlanEntry::new(5, id, planner_core::models::Crew::R1)],
    )
    .unwrap();

    let response = h.server.get("/2024/3").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("March 2024"));
    assert!(html.contains(r#"data-name="Acme""#));
    assert!(html.contains("&quot;client_id&quot;"));
}

#[tokio::test]
async fn save_then_copy_forward() {
    let h = harness();
    let id = add_client(&h.db, "Acme");

    let response = h
        .server
        .post("/api/save_plan")
        .json(&json!({
            "year": 2023,
            "month": 12,
            "plan": [{"day": 24, "client_id": id, "crew": "R2", "external_lab": true}]
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "1 assignments saved for December/2023.");

    let copied: Value = h.server.get("/api/copy_previous_month/2024/1").await.json();
    assert_eq!(
        copied,
        json!([{
            "year": 2023, "month": 12, "day": 24,
            "client_id": id, "crew": "R2", "external_lab": true
        }])
    );
}

#[tokio::test]
async fn save_with_empty_plan_clears_month() {
    let h = harness();
    let id = add_client(&h.db, "Acme");
    let march = YearMonth::new(2024, 3).unwrap();
    h.db.replace_month(
        march,
        &[planner_core::models::PlanEntry::new(1, id, planner_core::models::Crew::R1)],
    )
    .unwrap();

    let body: Value = h
        .server
        .post("/api/save_plan")
        .json(&json!({"year": 2024, "month": 3, "plan": []}))
        .await
        .json();
    assert_eq!(body["message"], "0 assignments saved for March/2024.");
    assert!(h.db.assignments_for(march).unwrap().is_empty());
}

#[tokio::test]
async fn save_rejects_incomplete_payloads() {
    let h = harness();

    for payload in [
        json!({"month": 3, "plan": []}),
        json!({"year": 2024, "plan": []}),
        json!({"year": 2024, "month": 3}),
    ] {
        let response = h.server.post("/api/save_plan").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Incomplete data received.");
    }

    let response = h
        .server
        .post("/api/save_plan")
        .json(&json!({"year": 2024, "month": 3, "plan": [{"day": 1, "client_id": 1, "crew": "R9"}]}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_with_unknown_client_is_a_server_error_and_keeps_old_plan() {
    let h = harness();
    let id = add_client(&h.db, "Acme");
    let march = YearMonth::new(2024, 3).unwrap();
    h.db.replace_month(
        march,
        &[planner_core::models::PlanEntry::new(1, id, planner_core::models::Crew::R1)],
    )
    .unwrap();

    let response = h
        .server
        .post("/api/save_plan")
        .json(&json!({"year": 2024, "month": 3, "plan": [{"day": 2, "client_id": 999, "crew": "R1"}]}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(h.db.assignments_for(march).unwrap().len(), 1);
}

#[tokio::test]
async fn export_returns_xlsx_attachment() {
    let h = harness();
    let id = add_client(&h.db, "Acme");
    h.server
        .post("/api/save_plan")
        .json(&json!({
            "year": 2024, "month": 3,
            "plan": [{"day": 5, "client_id": id, "crew": "R1", "external_lab": true}]
        }))
        .await
        .assert_status_ok();

    let response = h.server.get("/export_excel/2024/3").await;
    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_TYPE),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"Plan_March_2024.xlsx\""
    );
    assert!(response.as_bytes().starts_with(b"PK"));
}

#[tokio::test]
async fn export_with_missing_logo_reports_json_error() {
    let h = harness_with(ExportConfig {
        logo: Some("/definitely/not/here/logo.png".into()),
        ..ExportConfig::default()
    });

    let response = h.server.get("/export_excel/2024/3").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("logo.png"));
}

#[tokio::test]
async fn client_crud_redirects_back_to_list() {
    let h = harness();

    let response = h
        .server
        .post("/clients/add")
        .form(&[("name", "Acme"), ("address", "Main St 1"), ("phone", "")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/clients?notice="));

    let clients = h.db.list_clients().unwrap();
    assert_eq!(clients.len(), 1);
    let id = clients[0].id;
    assert_eq!(clients[0].phone, None);

    h.server
        .post(&format!("/clients/edit/{id}"))
        .form(&[("name", "Acme Ltd"), ("address", ""), ("phone", "555")])
        .await
        .assert_status(StatusCode::SEE_OTHER);
    let client = h.db.get_client(id).unwrap().unwrap();
    assert_eq!(client.name, "Acme Ltd");
    assert_eq!(client.phone.as_deref(), Some("555"));

    let listed: Value = h.server.get("/api/clients").await.json();
    assert_eq!(listed[0]["name"], "Acme Ltd");

    let page = h.server.get("/clients?notice=Client%20deleted.").await;
    page.assert_status_ok();
    assert!(page.text().contains("Client deleted."));

    h.server
        .post(&format!("/clients/delete/{id}"))
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert!(h.db.list_clients().unwrap().is_empty());
}

#[tokio::test]
async fn blank_client_name_is_not_saved() {
    let h = harness();
    let response = h
        .server
        .post("/clients/add")
        .form(&[("name", "   ")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/clients?notice=Client%20name%20is%20required."
    );
    assert!(h.db.list_clients().unwrap().is_empty());
}

#[tokio::test]
async fn editing_unknown_client_is_silently_ignored() {
    let h = harness();
    h.server
        .post("/clients/edit/404")
        .form(&[("name", "Ghost")])
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert!(h.db.list_clients().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let h = harness();
    let body: Value = h.server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
}
