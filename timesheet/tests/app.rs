mod helpers;
use helpers::{entry_json, spawn_server, TestClient, TOKEN};
use serde_json::json;
use timesheet::app::App;
use timesheet_client::session::Session;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn stored_session_logs_the_user_in() {
    let test = TestClient::build("http://127.0.0.1:9").unwrap();
    test.settings
        .save_session(&Session {
            token: Some(TOKEN.into()),
            username: "admin".into(),
        })
        .unwrap();

    let app = App::new(test.settings.clone()).unwrap();

    assert!(app.require_login().is_ok());
    assert_eq!(app.client.token(), Some(TOKEN));
    let user = &app.store.state().user;
    assert_eq!(user.username, "admin");
    assert!(user.is_admin());
}

#[test]
fn commands_need_a_session() {
    let test = TestClient::build("http://127.0.0.1:9").unwrap();
    let app = App::new(test.settings.clone()).unwrap();

    let err = app.require_login().unwrap_err();
    assert!(err.to_string().contains("timesheet login"));
    assert!(!app.store.state().user.is_logged_in());
}

#[tokio::test]
async fn find_entry_looks_through_everything() {
    let server = spawn_server().await;
    let test = TestClient::logged_in(&server.uri()).unwrap();
    test.settings
        .save_session(&Session {
            token: Some(TOKEN.into()),
            username: "admin".into(),
        })
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/api/timesheets"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "entries": [
                entry_json(3, "2018-10-06T08:05:00Z", "2018-10-06T17:05:00Z", 30),
            ],
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut app = App::new(test.settings.clone()).unwrap();

    let entry = app.find_entry("3").await.unwrap();
    assert_eq!(entry.hours_worked(), 8.5);

    let err = app.find_entry("4").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid timesheet entry id, 4");
}
