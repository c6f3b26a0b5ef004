use dutydesk_services::rank::AdminLevel;
use serde_json::Value;

use crate::fixtures::{mock_erlc::MockErlc, test_app::TestApp};

#[tokio::test]
async fn command_requires_moderator() {
    let mock = MockErlc::spawn().await;
    let app = TestApp::spawn_with_erlc(&mock).await;
    let trainee = app.token_for("trainee", AdminLevel::TraineeMod, &[]);

    let resp = app
        .auth_post("/api/erlc/command", &trainee)
        .json(&serde_json::json!({ "command": ":kick troublemaker" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
    assert!(mock.commands().is_empty());
}

#[tokio::test]
async fn command_is_forwarded_to_the_server() {
    let mock = MockErlc::spawn().await;
    let app = TestApp::spawn_with_erlc(&mock).await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);

    let resp = app
        .auth_post("/api/erlc/command", &token)
        .json(&serde_json::json!({ "command": ":kick troublemaker" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(mock.commands(), vec![":kick troublemaker".to_string()]);
}

#[tokio::test]
async fn blank_command_is_rejected() {
    let mock = MockErlc::spawn().await;
    let app = TestApp::spawn_with_erlc(&mock).await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);

    let resp = app
        .auth_post("/api/erlc/command", &token)
        .json(&serde_json::json!({ "command": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn empty_server_surfaces_as_422() {
    let mock = MockErlc::spawn().await;
    let app = TestApp::spawn_with_erlc(&mock).await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);
    mock.set_empty_server(true);

    let resp = app
        .auth_post("/api/erlc/command", &token)
        .json(&serde_json::json!({ "command": ":h hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["message"], "No players in server");
}

#[tokio::test]
async fn unreachable_server_surfaces_as_502() {
    let app = TestApp::spawn_with(|settings| {
        // Nothing listens here
        settings.erlc.api_base = "http://127.0.0.1:9".to_string();
    })
    .await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);

    let resp = app
        .auth_post("/api/erlc/command", &token)
        .json(&serde_json::json!({ "command": ":h hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 502);
}

#[tokio::test]
async fn players_and_join_logs_proxy_through() {
    let mock = MockErlc::spawn().await;
    let app = TestApp::spawn_with_erlc(&mock).await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);
    mock.set_players(&["Kai:12345", "Noor:67890"]);

    let resp = app
        .auth_get("/api/erlc/players", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let players: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["Player"], "Kai:12345");

    let resp = app
        .auth_get("/api/erlc/join-logs", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let logs: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["Join"], true);
}
