use dutydesk_services::rank::AdminLevel;
use serde_json::Value;

use crate::fixtures::{mock_erlc::MockErlc, test_app::TestApp};

#[tokio::test]
async fn create_requires_moderator() {
    let app = TestApp::spawn().await;
    let trainee = app.token_for("trainee", AdminLevel::TraineeMod, &[]);

    let resp = app
        .auth_post("/api/logs", &trainee)
        .json(&serde_json::json!({
            "target_user": "Kai",
            "log_type": "warned",
            "reason": "Speeding",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn create_records_action_and_staff() {
    let app = TestApp::spawn().await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);

    let resp = app
        .auth_post("/api/logs", &token)
        .json(&serde_json::json!({
            "target_user": "Kai",
            "log_type": "warned",
            "reason": "Speeding",
            "description": "Third time this week",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let log: Value = resp.json().await.unwrap();
    assert_eq!(log["target"], "Kai");
    assert_eq!(log["action"], "Issued a warned");
    assert_eq!(log["notes"], "Speeding: Third time this week");
    assert_eq!(log["staff"]["username"], "mod");
}

#[tokio::test]
async fn delete_requires_internal_affairs() {
    let app = TestApp::spawn().await;
    let moderator = app.token_for("mod", AdminLevel::Moderator, &[]);
    let ia = app.token_for("ia", AdminLevel::InternalAffairs, &[]);

    let resp = app
        .auth_post("/api/logs", &moderator)
        .json(&serde_json::json!({
            "target_user": "Kai",
            "log_type": "banned",
            "reason": "RDM",
        }))
        .send()
        .await
        .unwrap();
    let log: Value = resp.json().await.unwrap();
    let id = log["_id"]["$oid"].as_str().unwrap().to_string();

    let resp = app
        .auth_delete(&format!("/api/logs/{id}"), &moderator)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_delete(&format!("/api/logs/{id}"), &ia)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app.auth_get("/api/logs", &moderator).send().await.unwrap();
    let logs: Vec<Value> = resp.json().await.unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn sweep_notifies_online_targets_only() {
    let mock = MockErlc::spawn().await;
    let app = TestApp::spawn_with_erlc(&mock).await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);

    // Two actions: one target online, one offline
    for (target, reason) in [("Kai", "Speeding"), ("Noor", "FailRP")] {
        app.auth_post("/api/logs", &token)
            .json(&serde_json::json!({
                "target_user": target,
                "log_type": "warned",
                "reason": reason,
            }))
            .send()
            .await
            .unwrap();
    }

    mock.set_players(&["Kai:12345"]);
    let resp = app
        .auth_post("/api/notifications/check", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let outcome: Value = resp.json().await.unwrap();
    assert_eq!(outcome["processed"], 1);
    assert_eq!(
        mock.commands(),
        vec![":pm Kai You have been warned for Speeding".to_string()]
    );

    // A second sweep does not repeat the delivered PM
    let resp = app
        .auth_post("/api/notifications/check", &token)
        .send()
        .await
        .unwrap();
    let outcome: Value = resp.json().await.unwrap();
    assert_eq!(outcome["processed"], 0);
    assert_eq!(mock.commands().len(), 1);

    // Once Noor shows up, their PM goes out too
    mock.set_players(&["Kai:12345", "Noor:67890"]);
    let resp = app
        .auth_post("/api/notifications/check", &token)
        .send()
        .await
        .unwrap();
    let outcome: Value = resp.json().await.unwrap();
    assert_eq!(outcome["processed"], 1);
    assert_eq!(
        mock.commands()[1],
        ":pm Noor You have been warned for FailRP"
    );
}

#[tokio::test]
async fn sweep_with_nobody_online_is_a_noop() {
    let mock = MockErlc::spawn().await;
    let app = TestApp::spawn_with_erlc(&mock).await;
    let token = app.token_for("mod", AdminLevel::Moderator, &[]);

    app.auth_post("/api/logs", &token)
        .json(&serde_json::json!({
            "target_user": "Kai",
            "log_type": "warned",
            "reason": "Speeding",
        }))
        .send()
        .await
        .unwrap();

    let resp = app
        .auth_post("/api/notifications/check", &token)
        .send()
        .await
        .unwrap();
    let outcome: Value = resp.json().await.unwrap();
    assert_eq!(outcome["processed"], 0);
    assert!(mock.commands().is_empty());
}
